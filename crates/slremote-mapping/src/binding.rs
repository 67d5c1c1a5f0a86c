//! Control-to-host bindings and their value transfer modes.

use serde::{Deserialize, Serialize};

use crate::control::ControlId;
use crate::event::ControlEvent;
use crate::host::{HostAccess, HostParameter};
use crate::page::{PageId, SubPageAreaId, SubPageId};

/// One device step in normalized units.
pub const STEP: f32 = 1.0 / 127.0;

/// Pickup engages when the control lands this close to the host value.
const PICKUP_WINDOW: f32 = STEP * 0.5;

/// Host writes diverging from the last written value by more than this
/// mean the host moved the parameter on its own.
const DIVERGENCE_EPSILON: f32 = 1.0e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BindingMode {
    /// Control value goes straight to the parameter.
    #[default]
    Direct,
    /// Each press flips a boolean parameter.
    Toggle,
    /// Parameter follows the control only after the control has reached
    /// the parameter's current value.
    Pickup,
    /// Values are signed deltas.
    RelativeTwosComplement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationAction {
    NextPage,
    PrevPage,
    NextSubPage(SubPageAreaId),
    PrevSubPage(SubPageAreaId),
    ActivatePage(PageId),
    ActivateSubPage(SubPageId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingTarget {
    Parameter {
        parameter: HostParameter,
        mode: BindingMode,
    },
    Action(NavigationAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingScope {
    Page(PageId),
    SubPage(SubPageId),
}

impl std::fmt::Display for BindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page(id) => write!(f, "page {}", id.index()),
            Self::SubPage(id) => write!(f, "subpage {}", id.index()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Pickup {
    engaged: bool,
    last_position: Option<f32>,
    last_written: Option<f32>,
}

/// A registered binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub control: ControlId,
    pub target: BindingTarget,
    pub scope: BindingScope,
    pickup: Pickup,
}

impl Binding {
    pub fn new(control: ControlId, target: BindingTarget, scope: BindingScope) -> Self {
        Self {
            control,
            target,
            scope,
            pickup: Pickup::default(),
        }
    }

    pub fn parameter(&self) -> Option<HostParameter> {
        match self.target {
            BindingTarget::Parameter { parameter, .. } => Some(parameter),
            BindingTarget::Action(_) => None,
        }
    }

    pub fn sub_page(&self) -> Option<SubPageId> {
        match self.scope {
            BindingScope::SubPage(id) => Some(id),
            BindingScope::Page(_) => None,
        }
    }

    /// Whether pickup is currently tracking the control.
    pub fn is_engaged(&self) -> bool {
        self.pickup.engaged
    }

    /// Forget pickup tracking; the control must reach the host value again.
    pub fn release_pickup(&mut self) {
        self.pickup = Pickup::default();
    }

    /// Transfer a control event to the host parameter.
    ///
    /// Returns the value written, or `None` if nothing was written (an
    /// action binding, a release on a toggle, a zero delta, or a pickup
    /// that has not engaged yet).
    pub fn apply<H: HostAccess + ?Sized>(
        &mut self,
        event: &ControlEvent,
        host: &mut H,
    ) -> Option<f32> {
        let (parameter, mode) = match self.target {
            BindingTarget::Parameter { parameter, mode } => (parameter, mode),
            BindingTarget::Action(_) => return None,
        };

        let value = match mode {
            BindingMode::Direct => event.normalized(),
            BindingMode::Toggle => {
                if !event.is_press() {
                    return None;
                }
                if host.value(&parameter) >= 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
            BindingMode::RelativeTwosComplement => {
                let delta = relative_delta(event.data());
                if delta == 0 {
                    return None;
                }
                (host.value(&parameter) + delta as f32 * STEP).clamp(0.0, 1.0)
            }
            BindingMode::Pickup => {
                let position = event.normalized();
                if !self.pickup_tracks(position, host.value(&parameter)) {
                    return None;
                }
                self.pickup.last_written = Some(position);
                position
            }
        };

        host.set_value(&parameter, value);
        Some(value)
    }

    fn pickup_tracks(&mut self, position: f32, current: f32) -> bool {
        let pickup = &mut self.pickup;

        if pickup.engaged {
            if let Some(written) = pickup.last_written {
                if (current - written).abs() > DIVERGENCE_EPSILON {
                    pickup.engaged = false;
                    pickup.last_written = None;
                }
            }
        }

        if !pickup.engaged {
            let near = (position - current).abs() <= PICKUP_WINDOW;
            let crossed = pickup
                .last_position
                .is_some_and(|prev| (prev - current) * (position - current) <= 0.0);
            pickup.engaged = near || crossed;
        }

        pickup.last_position = Some(position);
        pickup.engaged
    }
}

/// Decode a 7-bit two's-complement delta: 1..=63 up, 64..=127 down.
#[inline]
pub fn relative_delta(value: u8) -> i8 {
    (((value & 0x7F) << 1) as i8) >> 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MixerParameter, ParameterStore};
    use approx::assert_relative_eq;

    fn binding(mode: BindingMode) -> (Binding, HostParameter) {
        let parameter = HostParameter::mixer(0, MixerParameter::Volume);
        let b = Binding::new(
            ControlId(0),
            BindingTarget::Parameter { parameter, mode },
            BindingScope::Page(PageId(0)),
        );
        (b, parameter)
    }

    fn cc(value: u8) -> ControlEvent {
        ControlEvent::control_change(ControlId(0), value)
    }

    #[test]
    fn test_relative_delta() {
        assert_eq!(relative_delta(0), 0);
        assert_eq!(relative_delta(1), 1);
        assert_eq!(relative_delta(63), 63);
        assert_eq!(relative_delta(64), -64);
        assert_eq!(relative_delta(65), -63);
        assert_eq!(relative_delta(127), -1);
    }

    #[test]
    fn test_direct() {
        let (mut b, p) = binding(BindingMode::Direct);
        let mut host = ParameterStore::new();
        assert_eq!(b.apply(&cc(127), &mut host), Some(1.0));
        assert_relative_eq!(host.value(&p), 1.0);
    }

    #[test]
    fn test_toggle_flips_on_press_only() {
        let (mut b, p) = binding(BindingMode::Toggle);
        let mut host = ParameterStore::new();

        b.apply(&cc(127), &mut host);
        assert_eq!(host.value(&p), 1.0);
        assert_eq!(b.apply(&cc(0), &mut host), None);
        assert_eq!(host.value(&p), 1.0);
        b.apply(&cc(127), &mut host);
        assert_eq!(host.value(&p), 0.0);
        assert_eq!(host.write_count(), 2);
    }

    #[test]
    fn test_relative_moves_by_steps() {
        let (mut b, p) = binding(BindingMode::RelativeTwosComplement);
        let mut host = ParameterStore::new();
        host.preset(p, 0.5);

        b.apply(&cc(3), &mut host);
        assert_relative_eq!(host.value(&p), 0.5 + 3.0 * STEP, epsilon = 1e-6);
        b.apply(&cc(127), &mut host);
        assert_relative_eq!(host.value(&p), 0.5 + 2.0 * STEP, epsilon = 1e-6);

        assert_eq!(b.apply(&cc(0), &mut host), None);
    }

    #[test]
    fn test_relative_saturates() {
        let (mut b, p) = binding(BindingMode::RelativeTwosComplement);
        let mut host = ParameterStore::new();
        b.apply(&cc(64), &mut host);
        assert_eq!(host.value(&p), 0.0);
    }

    #[test]
    fn test_pickup_waits_for_crossing() {
        let (mut b, p) = binding(BindingMode::Pickup);
        let mut host = ParameterStore::new();
        host.preset(p, 0.5);

        assert_eq!(b.apply(&cc(10), &mut host), None);
        assert_eq!(b.apply(&cc(40), &mut host), None);
        assert_relative_eq!(host.value(&p), 0.5);
        assert!(!b.is_engaged());

        // 40 -> 80 passes 63.5
        let written = b.apply(&cc(80), &mut host).unwrap();
        assert_relative_eq!(written, 80.0 / 127.0);
        assert!(b.is_engaged());

        b.apply(&cc(20), &mut host);
        assert_relative_eq!(host.value(&p), 20.0 / 127.0);
    }

    #[test]
    fn test_pickup_engages_when_landing_on_value() {
        let (mut b, p) = binding(BindingMode::Pickup);
        let mut host = ParameterStore::new();
        host.preset(p, 64.0 / 127.0);
        assert!(b.apply(&cc(64), &mut host).is_some());
    }

    #[test]
    fn test_pickup_drops_when_host_moves() {
        let (mut b, p) = binding(BindingMode::Pickup);
        let mut host = ParameterStore::new();
        b.apply(&cc(0), &mut host);
        assert!(b.is_engaged());

        host.preset(p, 1.0);
        assert_eq!(b.apply(&cc(5), &mut host), None);
        assert!(!b.is_engaged());

        b.release_pickup();
        assert_eq!(b.apply(&cc(127), &mut host), Some(1.0));
    }

    #[test]
    fn test_action_writes_nothing() {
        let mut b = Binding::new(
            ControlId(0),
            BindingTarget::Action(NavigationAction::NextPage),
            BindingScope::Page(PageId(0)),
        );
        let mut host = ParameterStore::new();
        assert_eq!(b.apply(&cc(127), &mut host), None);
        assert_eq!(host.write_count(), 0);
        assert_eq!(b.parameter(), None);
    }
}
