//! The SL MkIII driver: inbound MIDI to host writes, navigation to screen
//! updates, host feedback to LEDs and screens.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use slremote_mapping::{
    Activation, BindingModel, ControlEvent, ControlId, DispatchResult, DisplayState, HostAccess,
    HostParameter, InboundMessage, MidiSink, MixerBankZone, MixerParameter, PageId,
    SubPageAreaId, Surface, TransportParameter,
};
use slremote_protocol::display::{center, knob};
use slremote_protocol::{palette, DeviceMessage, LedRgbId, Rgb, CENTER_COLUMN};
use tracing::{debug, info, trace};

use crate::builder::DriverBuilder;
use crate::config::DriverConfig;
use crate::error::{Error, Result};
use crate::feedback::{parameter_label, switch_led_color, to_seven_bit, HostFeedback, StripState};
use crate::layout::{FaderStrip, SlMk3Layout};

/// A driver shared between the input thread and the host thread.
pub type SharedDriver<S> = Arc<Mutex<Driver<S>>>;

/// A page and the subpage areas the builder created for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageAreas {
    pub page: PageId,
    pub knobs: Option<SubPageAreaId>,
    pub faders: Option<SubPageAreaId>,
}

/// Everything rendered to the device goes through the sink `S`.
pub struct Driver<S: MidiSink> {
    config: DriverConfig,
    zone: MixerBankZone,
    surface: Surface,
    layout: SlMk3Layout,
    model: BindingModel,
    pages: Vec<PageAreas>,
    display: DisplayState,
    strips: Vec<StripState>,
    values: HashMap<HostParameter, f32>,
    sink: S,
}

impl Driver<Vec<DeviceMessage>> {
    pub fn builder() -> DriverBuilder {
        DriverBuilder::default()
    }
}

impl<S: MidiSink> Driver<S> {
    pub(crate) fn from_parts(
        config: DriverConfig,
        surface: Surface,
        layout: SlMk3Layout,
        model: BindingModel,
        pages: Vec<PageAreas>,
        sink: S,
    ) -> Self {
        let zone = config.mixer_bank_zone();
        Self {
            strips: vec![StripState::default(); zone.channel_count as usize],
            config,
            zone,
            surface,
            layout,
            model,
            pages,
            display: DisplayState::new(),
            values: HashMap::new(),
            sink,
        }
    }

    /// Render the active page from scratch.
    pub fn start(&mut self) {
        let Some(page) = self.model.active_page() else {
            return;
        };
        info!(
            page = self.model.page(page).map(|p| p.name()).unwrap_or_default(),
            pages = self.model.page_count(),
            "SL MkIII driver started"
        );
        let activations = self.model.activate_page(page);
        self.render_activations(&activations);
    }

    // ------------------------------------------------------------------
    // Inbound
    // ------------------------------------------------------------------

    /// Handle raw bytes from the device input port.
    pub fn handle_midi<H: HostAccess + ?Sized>(&mut self, bytes: &[u8], host: &mut H) -> DispatchResult {
        match InboundMessage::from_bytes(bytes) {
            Some(message) => self.handle_inbound(&message, host),
            None => {
                trace!(?bytes, "Ignoring undecodable MIDI");
                DispatchResult::default()
            }
        }
    }

    pub fn handle_inbound<H: HostAccess + ?Sized>(
        &mut self,
        message: &InboundMessage,
        host: &mut H,
    ) -> DispatchResult {
        match self.surface.resolve(message) {
            Some(event) => self.handle_event(&event, host),
            None => DispatchResult::default(),
        }
    }

    pub fn handle_event<H: HostAccess + ?Sized>(
        &mut self,
        event: &ControlEvent,
        host: &mut H,
    ) -> DispatchResult {
        let result = self.model.dispatch(event, host);
        self.render_activations(&result.activations);
        if let Some((parameter, value)) = result.written {
            self.values.insert(parameter, value);
            self.render_parameter(parameter, value);
        }
        result
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn next_page(&mut self) -> Vec<Activation> {
        let activations = self.model.next_page();
        self.render_activations(&activations);
        activations.into_vec()
    }

    pub fn prev_page(&mut self) -> Vec<Activation> {
        let activations = self.model.prev_page();
        self.render_activations(&activations);
        activations.into_vec()
    }

    pub fn activate_page(&mut self, page: PageId) -> Vec<Activation> {
        let activations = self.model.activate_page(page);
        self.render_activations(&activations);
        activations.into_vec()
    }

    pub fn activate_page_named(&mut self, name: &str) -> Result<Vec<Activation>> {
        let page = self
            .model
            .find_page(name)
            .ok_or_else(|| Error::UnknownPage(name.to_string()))?;
        Ok(self.activate_page(page))
    }

    pub fn next_sub_page(&mut self, area: SubPageAreaId) -> Vec<Activation> {
        let activations = self.model.next_sub_page(area);
        self.render_activations(&activations);
        activations.into_vec()
    }

    pub fn prev_sub_page(&mut self, area: SubPageAreaId) -> Vec<Activation> {
        let activations = self.model.prev_sub_page(area);
        self.render_activations(&activations);
        activations.into_vec()
    }

    // ------------------------------------------------------------------
    // Host feedback
    // ------------------------------------------------------------------

    pub fn on_host_feedback(&mut self, feedback: HostFeedback) {
        match feedback {
            HostFeedback::ChannelTitle { channel, title } => {
                let Some(strip) = self.strips.get_mut(channel as usize) else {
                    return;
                };
                strip.title = title;
                self.render_strip(channel);
            }
            HostFeedback::ChannelColor {
                channel,
                r,
                g,
                b,
                alpha,
            } => {
                let color = Rgb::from_unit(r, g, b, alpha);
                let Some(strip) = self.strips.get_mut(channel as usize) else {
                    return;
                };
                if strip.color.replace(color) == Some(color) {
                    return;
                }
                if let Some(fader) = self.layout.fader_strips.get(channel as usize) {
                    self.sink
                        .send(&DeviceMessage::set_led_color_rgb(LedRgbId::fader(fader.strip), color));
                }
                self.render_strip(channel);
            }
            HostFeedback::ParameterValue { parameter, value } => {
                self.values.insert(parameter, value);
                self.render_parameter(parameter, value);
            }
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn zone(&self) -> &MixerBankZone {
        &self.zone
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn layout(&self) -> &SlMk3Layout {
        &self.layout
    }

    pub fn model(&self) -> &BindingModel {
        &self.model
    }

    pub fn pages(&self) -> &[PageAreas] {
        &self.pages
    }

    pub fn page_areas(&self, page: PageId) -> Option<&PageAreas> {
        self.pages.iter().find(|p| p.page == page)
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Last value written or reported for `parameter`.
    pub fn cached_value(&self, parameter: &HostParameter) -> Option<f32> {
        self.values.get(parameter).copied()
    }

    pub fn strip_state(&self, channel: u8) -> Option<&StripState> {
        self.strips.get(channel as usize)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn into_shared(self) -> SharedDriver<S> {
        Arc::new(Mutex::new(self))
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// One screen reset per batch, then the active page is redrawn.
    fn render_activations(&mut self, activations: &[Activation]) {
        if activations.is_empty() {
            return;
        }
        debug!(?activations, "Rendering activations");
        let reset = self.display.reset();
        self.sink.send_all(&reset);

        let Some(page_id) = self.model.active_page() else {
            return;
        };
        let mut out = Vec::new();
        if let Some(page) = self.model.page(page_id) {
            out.extend(self.display.set_text(CENTER_COLUMN, center::text::LEFT_1, page.name()));
            for label in page.labels() {
                out.extend(self.display.set_text(label.column, label.field, &label.text));
            }
            for (position, &area) in page.areas().iter().enumerate() {
                let Some(sub_page) = self
                    .model
                    .active_sub_page(area)
                    .and_then(|id| self.model.sub_page(id))
                else {
                    continue;
                };
                for label in sub_page.labels() {
                    out.extend(self.display.set_text(label.column, label.field, &label.text));
                }
                let field = (center::text::RIGHT_1 as usize + position).min(center::text::RIGHT_2 as usize);
                out.extend(self.display.set_text(CENTER_COLUMN, field as u8, sub_page.name()));
            }
        }
        self.sink.send_all(&out);

        for channel in self.zone.channels() {
            self.render_strip(channel);
        }

        if let Some(notification) = self.notification(activations) {
            self.sink.send(&notification);
        }
        self.render_navigation_leds(page_id);
    }

    fn notification(&self, activations: &[Activation]) -> Option<DeviceMessage> {
        let entered_page = activations.iter().find_map(|a| match a {
            Activation::PageEntered(page) => Some(*page),
            _ => None,
        });
        if let Some(page) = entered_page {
            let name = self.model.page(page)?.name();
            return Some(DeviceMessage::set_notification(name, ""));
        }
        let sub_page = activations.iter().rev().find_map(|a| match a {
            Activation::SubPageEntered(sub) => self.model.sub_page(*sub),
            _ => None,
        })?;
        let area = self.model.area(sub_page.area())?;
        Some(DeviceMessage::set_notification(area.name(), sub_page.name()))
    }

    fn render_navigation_leds(&mut self, page: PageId) {
        let areas = self.page_areas(page).copied();
        let multi_page = self.model.page_count() > 1;
        let lit = [
            (self.layout.prev_page, multi_page),
            (self.layout.next_page, multi_page),
            (self.layout.prev_knob_sub_page, areas.is_some_and(|a| a.knobs.is_some())),
            (self.layout.next_knob_sub_page, areas.is_some_and(|a| a.knobs.is_some())),
            (self.layout.prev_fader_sub_page, areas.is_some_and(|a| a.faders.is_some())),
            (self.layout.next_fader_sub_page, areas.is_some_and(|a| a.faders.is_some())),
        ];
        for (control, on) in lit {
            if let Some(led) = self.layout.index_led(&self.surface, control) {
                let color = if on { palette::DIM_WHITE } else { palette::OFF };
                self.sink.send(&DeviceMessage::set_led_color_index(led, color));
            }
        }
    }

    /// Parameter the knob of `channel` currently controls.
    fn knob_parameter(&self, channel: u8) -> Option<HostParameter> {
        let strip = self.layout.knob_strips.get(channel as usize)?;
        self.model.resolve(strip.knob)?.parameter()
    }

    /// Knob screen of one bank slot.
    fn render_strip(&mut self, channel: u8) {
        let knob_parameter = self.knob_parameter(channel);
        let Some(strip) = self.strips.get(channel as usize) else {
            return;
        };
        let mut out = Vec::new();
        out.extend(self.display.set_text(channel, knob::text::TEXT_1, &strip.title));
        if let Some(color) = strip.color {
            out.extend(self.display.set_color(channel, knob::color::TOP_BAR, color));
        }
        if let Some(parameter) = knob_parameter {
            if let HostParameter::Mixer { parameter: mixer, .. } = parameter {
                out.extend(self.display.set_text(channel, knob::text::TEXT_2, &parameter_label(mixer)));
            }
            // Unknown values show as 0 rather than the previous binding's value.
            let value = self.values.get(&parameter).map_or(0, |&v| to_seven_bit(v));
            out.extend(self.display.set_value(channel, knob::value::KNOB_VALUE, value));
        }
        let selected = HostParameter::mixer(channel, MixerParameter::Selected);
        if let Some(&value) = self.values.get(&selected) {
            out.extend(self.display.set_value(channel, knob::value::SELECTED, to_seven_bit(value)));
        }
        self.sink.send_all(&out);
    }

    fn render_parameter(&mut self, parameter: HostParameter, value: f32) {
        match parameter {
            HostParameter::Mixer {
                channel,
                parameter: mixer,
            } => {
                if channel >= self.zone.channel_count {
                    return;
                }
                let led_control = match mixer {
                    MixerParameter::Mute => self.fader_control(channel, |s| s.button_top),
                    MixerParameter::Solo => self.fader_control(channel, |s| s.button_bottom),
                    MixerParameter::Selected => {
                        self.layout.knob_strips.get(channel as usize).map(|s| s.button)
                    }
                    MixerParameter::Pan | MixerParameter::SendLevel(_) | MixerParameter::Volume => None,
                };
                if let Some(control) = led_control {
                    self.send_switch_led(control, &parameter, value);
                }
                if mixer == MixerParameter::Selected || self.knob_parameter(channel) == Some(parameter) {
                    self.render_strip(channel);
                }
            }
            HostParameter::Transport(transport) => {
                let t = &self.layout.transport;
                let control = match transport {
                    TransportParameter::Start => t.start,
                    TransportParameter::Stop => t.stop,
                    TransportParameter::Record => t.record,
                    TransportParameter::Rewind => t.rewind,
                    TransportParameter::Forward => t.forward,
                    TransportParameter::Cycle => t.cycle,
                };
                self.send_switch_led(control, &parameter, value);
            }
        }
    }

    fn fader_control(
        &self,
        channel: u8,
        pick: impl Fn(&FaderStrip) -> ControlId,
    ) -> Option<ControlId> {
        self.layout.fader_strips.get(channel as usize).map(pick)
    }

    fn send_switch_led(&mut self, control: ControlId, parameter: &HostParameter, value: f32) {
        if let Some(led) = self.layout.index_led(&self.surface, control) {
            let color = switch_led_color(parameter, value);
            self.sink.send(&DeviceMessage::set_led_color_index(led, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slremote_mapping::ParameterStore;
    use slremote_protocol::{LedIndexColorId, Layout};

    fn driver() -> Driver<Vec<DeviceMessage>> {
        Driver::builder().build(Vec::new()).unwrap()
    }

    #[test]
    fn test_start_resets_once_and_names_page() {
        let mut driver = driver();
        driver.start();
        let sent = driver.sink();
        let layout = DeviceMessage::activate_layout(Layout::Knob);
        let resets = sent.iter().filter(|m| **m == layout).count();
        assert_eq!(resets, 1);
        assert!(sent.contains(&DeviceMessage::set_display_text(CENTER_COLUMN, 0, "Mixer Page")));
        assert!(sent.contains(&DeviceMessage::set_display_text(CENTER_COLUMN, 2, "Pan")));
        assert!(sent.contains(&DeviceMessage::set_notification("Mixer Page", "")));
    }

    #[test]
    fn test_toggle_lights_mute_led() {
        let mut driver = driver();
        let mut host = ParameterStore::new();
        let mute = driver.layout().fader_strips[2].button_top;
        driver.handle_event(&ControlEvent::control_change(mute, 127), &mut host);

        let parameter = HostParameter::mixer(2, MixerParameter::Mute);
        assert_eq!(host.value(&parameter), 1.0);
        assert_eq!(driver.cached_value(&parameter), Some(1.0));
        assert_eq!(
            driver.sink().last(),
            Some(&DeviceMessage::set_led_color_index(LedIndexColorId::new(0x3B + 2), palette::YELLOW))
        );
    }

    #[test]
    fn test_unknown_page_name() {
        let mut driver = driver();
        assert!(matches!(
            driver.activate_page_named("Nope"),
            Err(Error::UnknownPage(_))
        ));
        let test_page = driver.model().find_page("Test Page").unwrap();
        let activations = driver.activate_page_named("Test Page").unwrap();
        assert!(activations.contains(&Activation::PageEntered(test_page)));
        assert_eq!(driver.model().active_page(), Some(test_page));
    }

    #[test]
    fn test_channel_title_only_once() {
        let mut driver = driver();
        driver.on_host_feedback(HostFeedback::ChannelTitle {
            channel: 0,
            title: "Kick".into(),
        });
        let first = driver.sink().len();
        assert!(driver.sink().contains(&DeviceMessage::set_display_text(0, 0, "Kick")));

        driver.on_host_feedback(HostFeedback::ChannelTitle {
            channel: 0,
            title: "Kick".into(),
        });
        assert_eq!(driver.sink().len(), first);
    }

    #[test]
    fn test_unchanged_channel_color_not_resent() {
        let mut driver = driver();
        let color = HostFeedback::ChannelColor {
            channel: 3,
            r: 0.0,
            g: 1.0,
            b: 0.0,
            alpha: 1.0,
        };
        driver.on_host_feedback(color.clone());
        let led = DeviceMessage::set_led_color_rgb(
            LedRgbId::fader(driver.layout().fader_strips[3].strip),
            Rgb::new(0, 127, 0),
        );
        assert!(driver.sink().contains(&led));

        driver.sink_mut().clear();
        driver.on_host_feedback(color);
        assert!(driver.sink().is_empty());
    }

    #[test]
    fn test_feedback_outside_bank_ignored() {
        let mut driver = Driver::builder().bank_size(2).build(Vec::<DeviceMessage>::new()).unwrap();
        driver.on_host_feedback(HostFeedback::ChannelTitle {
            channel: 5,
            title: "Far".into(),
        });
        driver.on_host_feedback(HostFeedback::ParameterValue {
            parameter: HostParameter::mixer(5, MixerParameter::Mute),
            value: 1.0,
        });
        assert!(driver.sink().is_empty());
    }
}
