//! Builder for configuring and constructing a [`Driver`].

use slremote_mapping::{
    BindingMode, BindingModel, BindingScope, HostParameter, MidiSink, MixerBankZone,
    MixerParameter, NavigationAction, PortPair, Surface, TransportParameter,
};
use tracing::debug;

use crate::config::{DriverConfig, PageConfig, FADER_AREA_NAME, KNOB_AREA_NAME};
use crate::driver::{Driver, PageAreas};
use crate::error::Result;
use crate::layout::{SlMk3Layout, TransportButtons};

/// Pages are optional: without any `.page()` call the default mixer and
/// test pages are used.
///
/// # Example
///
/// ```
/// use slremote::prelude::*;
///
/// let driver = Driver::builder()
///     .bank_size(4)
///     .page(PageConfig::new("Mix").knob_sub_page("Pan", KnobAssignment::Pan))
///     .build(Vec::<DeviceMessage>::new())?;
///
/// assert_eq!(driver.model().page_count(), 1);
/// # Ok::<(), slremote::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DriverBuilder {
    config: DriverConfig,
    custom_pages: bool,
}

impl DriverBuilder {
    /// Mixer channels bound to the strips (default 8).
    pub fn bank_size(mut self, bank_size: u8) -> Self {
        self.config.bank_size = bank_size;
        self
    }

    /// Add a page. The first call replaces the default pages.
    pub fn page(mut self, page: PageConfig) -> Self {
        if !self.custom_pages {
            self.config.pages.clear();
            self.custom_pages = true;
        }
        self.config.pages.push(page);
        self
    }

    pub fn ports(mut self, ports: PortPair) -> Self {
        self.config.ports = ports;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self.custom_pages = true;
        self
    }

    pub fn build<S: MidiSink>(self, sink: S) -> Result<Driver<S>> {
        let config = self.config;
        config.validate()?;

        let mut surface = Surface::new();
        let layout = SlMk3Layout::build(&mut surface)?;
        let mut model = BindingModel::with_control_count(surface.len());
        let zone = config.mixer_bank_zone();

        let mut pages = Vec::with_capacity(config.pages.len());
        for page in &config.pages {
            pages.push(bind_page(&mut model, &layout, &zone, page)?);
        }
        debug!(
            pages = pages.len(),
            bindings = model.registrations().len(),
            "Driver bindings registered"
        );

        Ok(Driver::from_parts(config, surface, layout, model, pages, sink))
    }
}

fn bind_page(
    model: &mut BindingModel,
    layout: &SlMk3Layout,
    zone: &MixerBankZone,
    config: &PageConfig,
) -> Result<PageAreas> {
    let page = model.add_page(config.name.clone());
    let scope = BindingScope::Page(page);
    for label in &config.labels {
        model.add_page_label(page, label.clone())?;
    }

    model.bind_action(layout.prev_page, NavigationAction::PrevPage, scope)?;
    model.bind_action(layout.next_page, NavigationAction::NextPage, scope)?;
    bind_transport(model, &layout.transport, scope)?;

    for channel in zone.channels() {
        let (Some(knob_strip), Some(fader_strip)) = (
            layout.knob_strips.get(channel as usize),
            layout.fader_strips.get(channel as usize),
        ) else {
            continue;
        };
        let switches = [
            (knob_strip.button, MixerParameter::Selected),
            (fader_strip.button_top, MixerParameter::Mute),
            (fader_strip.button_bottom, MixerParameter::Solo),
        ];
        for (control, parameter) in switches {
            if let Some(parameter) = zone.parameter(channel, parameter) {
                model.bind_parameter(control, parameter, BindingMode::Toggle, scope)?;
            }
        }

        if config.knob_sub_pages.is_empty() {
            if let Some(pan) = zone.parameter(channel, MixerParameter::Pan) {
                model.bind_parameter(knob_strip.knob, pan, BindingMode::RelativeTwosComplement, scope)?;
            }
        }
        if config.fader_sub_pages.is_empty() {
            if let Some(volume) = zone.parameter(channel, MixerParameter::Volume) {
                model.bind_parameter(fader_strip.fader, volume, BindingMode::Pickup, scope)?;
            }
        }
    }

    let knobs = if config.knob_sub_pages.is_empty() {
        None
    } else {
        let area = model.add_sub_page_area(page, KNOB_AREA_NAME)?;
        model.bind_action(layout.prev_knob_sub_page, NavigationAction::PrevSubPage(area), scope)?;
        model.bind_action(layout.next_knob_sub_page, NavigationAction::NextSubPage(area), scope)?;

        for sub_config in &config.knob_sub_pages {
            let sub_page = model.add_sub_page(area, sub_config.name.clone())?;
            for label in &sub_config.labels {
                model.add_sub_page_label(sub_page, label.clone())?;
            }
            let parameter = sub_config.knobs.parameter();
            for (channel, strip) in zone.channels().zip(&layout.knob_strips) {
                if let Some(parameter) = zone.parameter(channel, parameter) {
                    model.bind_parameter(
                        strip.knob,
                        parameter,
                        BindingMode::RelativeTwosComplement,
                        BindingScope::SubPage(sub_page),
                    )?;
                }
            }
        }
        Some(area)
    };

    let faders = if config.fader_sub_pages.is_empty() {
        None
    } else {
        let area = model.add_sub_page_area(page, FADER_AREA_NAME)?;
        model.bind_action(layout.prev_fader_sub_page, NavigationAction::PrevSubPage(area), scope)?;
        model.bind_action(layout.next_fader_sub_page, NavigationAction::NextSubPage(area), scope)?;

        for sub_config in &config.fader_sub_pages {
            let sub_page = model.add_sub_page(area, sub_config.name.clone())?;
            for label in &sub_config.labels {
                model.add_sub_page_label(sub_page, label.clone())?;
            }
            let parameter = sub_config.faders.parameter();
            for (channel, strip) in zone.channels().zip(&layout.fader_strips) {
                if let Some(parameter) = zone.parameter(channel, parameter) {
                    model.bind_parameter(
                        strip.fader,
                        parameter,
                        BindingMode::Pickup,
                        BindingScope::SubPage(sub_page),
                    )?;
                }
            }
        }
        Some(area)
    };

    Ok(PageAreas { page, knobs, faders })
}

fn bind_transport(
    model: &mut BindingModel,
    transport: &TransportButtons,
    scope: BindingScope,
) -> Result<()> {
    let buttons = [
        (transport.rewind, TransportParameter::Rewind, BindingMode::Direct),
        (transport.forward, TransportParameter::Forward, BindingMode::Direct),
        (transport.stop, TransportParameter::Stop, BindingMode::Direct),
        (transport.start, TransportParameter::Start, BindingMode::Direct),
        (transport.cycle, TransportParameter::Cycle, BindingMode::Toggle),
        (transport.record, TransportParameter::Record, BindingMode::Toggle),
    ];
    for (control, parameter, mode) in buttons {
        model.bind_parameter(control, HostParameter::Transport(parameter), mode, scope)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FaderAssignment, KnobAssignment};
    use slremote_mapping::{BindingTarget, ControlId};
    use slremote_protocol::DeviceMessage;

    fn bindings_for(driver: &Driver<Vec<DeviceMessage>>, control: ControlId) -> usize {
        driver
            .model()
            .registrations()
            .iter()
            .filter(|b| b.control == control)
            .count()
    }

    #[test]
    fn test_default_build() {
        let driver = DriverBuilder::default().build(Vec::<DeviceMessage>::new()).unwrap();
        assert_eq!(driver.model().page_count(), 2);

        let mixer = &driver.pages()[0];
        assert!(mixer.knobs.is_some());
        assert!(mixer.faders.is_none());
        assert!(driver.pages()[1].knobs.is_none());

        // Knob 0: one binding per knob subpage plus pan on the test page.
        let knob = driver.layout().knob_strips[0].knob;
        assert_eq!(bindings_for(&driver, knob), 3);
    }

    #[test]
    fn test_page_replaces_defaults() {
        let driver = DriverBuilder::default()
            .page(PageConfig::new("Sends").fader_sub_page("Send 1", FaderAssignment::SendLevel(0)))
            .page(PageConfig::new("Plain"))
            .build(Vec::<DeviceMessage>::new())
            .unwrap();
        assert_eq!(driver.model().page_count(), 2);
        assert_eq!(driver.model().find_page("Mixer Page"), None);
        assert!(driver.pages()[0].faders.is_some());
    }

    #[test]
    fn test_bank_size_limits_strips() {
        let driver = DriverBuilder::default()
            .bank_size(2)
            .page(PageConfig::new("Mix").knob_sub_page("Pan", KnobAssignment::Pan))
            .build(Vec::<DeviceMessage>::new())
            .unwrap();
        let strips = &driver.layout().fader_strips;
        assert_eq!(bindings_for(&driver, strips[1].fader), 1);
        assert_eq!(bindings_for(&driver, strips[2].fader), 0);
        assert_eq!(bindings_for(&driver, driver.layout().knob_strips[5].knob), 0);
    }

    #[test]
    fn test_transport_modes() {
        let driver = DriverBuilder::default().build(Vec::<DeviceMessage>::new()).unwrap();
        let transport = driver.layout().transport;
        let record = driver.model().resolve(transport.record).unwrap();
        assert_eq!(
            record.target,
            BindingTarget::Parameter {
                parameter: HostParameter::Transport(TransportParameter::Record),
                mode: BindingMode::Toggle,
            }
        );
        let start = driver.model().resolve(transport.start).unwrap();
        assert!(matches!(
            start.target,
            BindingTarget::Parameter {
                mode: BindingMode::Direct,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = DriverBuilder::default().bank_size(0).build(Vec::<DeviceMessage>::new());
        assert!(result.is_err());
    }
}
