//! Outbound message sinks.
//!
//! [`MidiSink`] is the hand-off to the host's send queue. Sends never
//! block and never fail: a sink that cannot take a message drops it,
//! since feedback always reflects current state and is re-sent on the
//! next change.

use ringbuf::{traits::*, HeapCons, HeapProd, HeapRb};
use slremote_protocol::DeviceMessage;
use tracing::debug;

const DEFAULT_CAPACITY: usize = 512;

pub trait MidiSink {
    fn send(&mut self, message: &DeviceMessage);

    fn send_all(&mut self, messages: &[DeviceMessage]) {
        for message in messages {
            self.send(message);
        }
    }
}

/// Capture sink.
impl MidiSink for Vec<DeviceMessage> {
    fn send(&mut self, message: &DeviceMessage) {
        self.push(message.clone());
    }
}

impl<S: MidiSink + ?Sized> MidiSink for &mut S {
    fn send(&mut self, message: &DeviceMessage) {
        (**self).send(message);
    }
}

impl<S: MidiSink + ?Sized> MidiSink for Box<S> {
    fn send(&mut self, message: &DeviceMessage) {
        (**self).send(message);
    }
}

/// Producer side: the driver writes feedback here.
pub struct FeedbackProducer {
    producer: HeapProd<DeviceMessage>,
}

impl FeedbackProducer {
    /// Returns `false` if the ring buffer is full.
    #[inline]
    pub fn push(&mut self, message: DeviceMessage) -> bool {
        self.producer.try_push(message).is_ok()
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.producer.vacant_len()
    }
}

impl MidiSink for FeedbackProducer {
    fn send(&mut self, message: &DeviceMessage) {
        if !self.push(message.clone()) {
            debug!("Feedback queue full, dropping message");
        }
    }
}

/// Consumer side: the transport drains feedback from here.
pub struct FeedbackConsumer {
    consumer: HeapCons<DeviceMessage>,
}

impl FeedbackConsumer {
    #[inline]
    pub fn pop(&mut self) -> Option<DeviceMessage> {
        self.consumer.try_pop()
    }

    pub fn drain_all(&mut self) -> Vec<DeviceMessage> {
        let mut messages = Vec::with_capacity(self.consumer.occupied_len());
        while let Some(message) = self.consumer.try_pop() {
            messages.push(message);
        }
        messages
    }

    /// Forward everything queued to `sink`, in order. Returns the count.
    pub fn drain_into<S: MidiSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut count = 0;
        while let Some(message) = self.consumer.try_pop() {
            sink.send(&message);
            count += 1;
        }
        count
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.consumer.is_empty()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.consumer.occupied_len()
    }
}

/// Single-producer single-consumer feedback queue.
pub fn feedback_channel() -> (FeedbackProducer, FeedbackConsumer) {
    feedback_channel_with_capacity(DEFAULT_CAPACITY)
}

pub fn feedback_channel_with_capacity(capacity: usize) -> (FeedbackProducer, FeedbackConsumer) {
    let rb = HeapRb::new(capacity);
    let (producer, consumer) = rb.split();
    (FeedbackProducer { producer }, FeedbackConsumer { consumer })
}
