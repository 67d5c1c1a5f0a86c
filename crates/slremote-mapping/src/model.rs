//! Page/subpage tree, navigation state and binding resolution.
//!
//! The tree is built once at setup. Afterwards only the active pointers
//! in [`NavigationState`] move. Navigation wraps in both directions and
//! ignores unknown ids, so no runtime call on the model can fail.
//!
//! A control resolves against the active page in this order:
//!
//! 1. for every subpage area of the page the control belongs to, the
//!    binding scoped to that area's active subpage;
//! 2. the page-level binding;
//! 3. nothing: the event is dropped.
//!
//! A control belongs to an area once any binding scoped to one of the
//! area's subpages is registered for it. Page-level bindings stay in
//! force as the fallback when the active subpage leaves the control
//! unbound.

use std::collections::HashMap;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::binding::{Binding, BindingMode, BindingScope, BindingTarget, NavigationAction};
use crate::control::ControlId;
use crate::error::{Error, Result};
use crate::event::ControlEvent;
use crate::host::{HostAccess, HostParameter};
use crate::page::{DisplayLabel, Page, PageId, SubPage, SubPageArea, SubPageAreaId, SubPageId};

/// Entry and exit hooks produced by navigation, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activation {
    PageExited(PageId),
    PageEntered(PageId),
    SubPageEntered(SubPageId),
}

pub type Activations = SmallVec<[Activation; 4]>;

/// Active page and the active subpage of every area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    active_page: Option<PageId>,
    /// Position within each area's subpage list, indexed by area id.
    active_sub_pages: Vec<usize>,
}

impl NavigationState {
    pub fn active_page(&self) -> Option<PageId> {
        self.active_page
    }
}

/// Outcome of dispatching one control event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchResult {
    /// Parameter and value written to the host, if any.
    pub written: Option<(HostParameter, f32)>,
    pub activations: Activations,
}

impl DispatchResult {
    pub fn is_noop(&self) -> bool {
        self.written.is_none() && self.activations.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BindingModel {
    pages: Vec<Page>,
    areas: Vec<SubPageArea>,
    sub_pages: Vec<SubPage>,
    bindings: Vec<Binding>,
    page_bindings: HashMap<(PageId, ControlId), usize>,
    sub_page_bindings: HashMap<(SubPageId, ControlId), usize>,
    area_members: HashMap<SubPageAreaId, SmallVec<[ControlId; 8]>>,
    state: NavigationState,
    /// Number of valid control ids, when known.
    control_count: Option<usize>,
}

impl BindingModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A model that rejects bindings for ids outside `0..control_count`.
    pub fn with_control_count(control_count: usize) -> Self {
        Self {
            control_count: Some(control_count),
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------

    /// Register a page. The first page registered starts out active.
    pub fn add_page(&mut self, name: impl Into<String>) -> PageId {
        let id = PageId(self.pages.len());
        self.pages.push(Page {
            name: name.into(),
            areas: Vec::new(),
            labels: Vec::new(),
        });
        if self.state.active_page.is_none() {
            self.state.active_page = Some(id);
        }
        id
    }

    pub fn add_sub_page_area(
        &mut self,
        page: PageId,
        name: impl Into<String>,
    ) -> Result<SubPageAreaId> {
        let id = SubPageAreaId(self.areas.len());
        self.pages
            .get_mut(page.0)
            .ok_or(Error::UnknownPage(page))?
            .areas
            .push(id);
        self.areas.push(SubPageArea {
            name: name.into(),
            page,
            sub_pages: Vec::new(),
        });
        self.state.active_sub_pages.push(0);
        Ok(id)
    }

    pub fn add_sub_page(&mut self, area: SubPageAreaId, name: impl Into<String>) -> Result<SubPageId> {
        let id = SubPageId(self.sub_pages.len());
        self.areas
            .get_mut(area.0)
            .ok_or(Error::UnknownSubPageArea(area))?
            .sub_pages
            .push(id);
        self.sub_pages.push(SubPage {
            name: name.into(),
            area,
            labels: Vec::new(),
        });
        Ok(id)
    }

    pub fn add_page_label(&mut self, page: PageId, label: DisplayLabel) -> Result<()> {
        self.pages
            .get_mut(page.0)
            .ok_or(Error::UnknownPage(page))?
            .labels
            .push(label);
        Ok(())
    }

    pub fn add_sub_page_label(&mut self, sub_page: SubPageId, label: DisplayLabel) -> Result<()> {
        self.sub_pages
            .get_mut(sub_page.0)
            .ok_or(Error::UnknownSubPage(sub_page))?
            .labels
            .push(label);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Binding registration
    // ------------------------------------------------------------------

    pub fn bind_parameter(
        &mut self,
        control: ControlId,
        parameter: HostParameter,
        mode: BindingMode,
        scope: BindingScope,
    ) -> Result<()> {
        self.register(Binding::new(
            control,
            BindingTarget::Parameter { parameter, mode },
            scope,
        ))
    }

    pub fn bind_action(
        &mut self,
        control: ControlId,
        action: NavigationAction,
        scope: BindingScope,
    ) -> Result<()> {
        let owner = self.scope_page(scope)?;
        match action {
            NavigationAction::NextPage | NavigationAction::PrevPage => {}
            NavigationAction::NextSubPage(area) | NavigationAction::PrevSubPage(area) => {
                let area_page = self.area(area).ok_or(Error::UnknownSubPageArea(area))?.page;
                if area_page != owner {
                    return Err(Error::ForeignSubPageArea { area, page: owner });
                }
            }
            NavigationAction::ActivatePage(page) => {
                self.page(page).ok_or(Error::UnknownPage(page))?;
            }
            NavigationAction::ActivateSubPage(sub_page) => {
                self.sub_page(sub_page)
                    .ok_or(Error::UnknownSubPage(sub_page))?;
            }
        }
        self.register(Binding::new(control, BindingTarget::Action(action), scope))
    }

    fn register(&mut self, binding: Binding) -> Result<()> {
        let control = binding.control;
        if let Some(count) = self.control_count {
            if control.index() >= count {
                return Err(Error::UnknownControl(control));
            }
        }
        self.scope_page(binding.scope)?;

        let index = self.bindings.len();
        match binding.scope {
            BindingScope::Page(page) => {
                if self.page_bindings.contains_key(&(page, control)) {
                    return Err(Error::DuplicateBinding {
                        control,
                        scope: binding.scope.to_string(),
                    });
                }
                self.page_bindings.insert((page, control), index);
            }
            BindingScope::SubPage(sub_page) => {
                if self.sub_page_bindings.contains_key(&(sub_page, control)) {
                    return Err(Error::DuplicateBinding {
                        control,
                        scope: binding.scope.to_string(),
                    });
                }
                self.sub_page_bindings.insert((sub_page, control), index);
                let members = self
                    .area_members
                    .entry(self.sub_pages[sub_page.0].area)
                    .or_default();
                if !members.contains(&control) {
                    members.push(control);
                }
            }
        }

        trace!(
            "Registered binding for control {} in {}",
            control.index(),
            binding.scope
        );
        self.bindings.push(binding);
        Ok(())
    }

    fn scope_page(&self, scope: BindingScope) -> Result<PageId> {
        match scope {
            BindingScope::Page(page) => {
                self.page(page).ok_or(Error::UnknownPage(page))?;
                Ok(page)
            }
            BindingScope::SubPage(sub_page) => {
                let area = self
                    .sub_page(sub_page)
                    .ok_or(Error::UnknownSubPage(sub_page))?
                    .area;
                Ok(self.areas[area.0].page)
            }
        }
    }

    /// Every registered binding, one per (control, scope), in
    /// registration order.
    pub fn registrations(&self) -> &[Binding] {
        &self.bindings
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.get(id.0)
    }

    pub fn area(&self, id: SubPageAreaId) -> Option<&SubPageArea> {
        self.areas.get(id.0)
    }

    pub fn sub_page(&self, id: SubPageId) -> Option<&SubPage> {
        self.sub_pages.get(id.0)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> impl Iterator<Item = (PageId, &Page)> {
        self.pages.iter().enumerate().map(|(i, p)| (PageId(i), p))
    }

    pub fn find_page(&self, name: &str) -> Option<PageId> {
        self.pages.iter().position(|p| p.name == name).map(PageId)
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn active_page(&self) -> Option<PageId> {
        self.state.active_page
    }

    /// Active subpage of `area`, whether or not its page is active.
    pub fn active_sub_page(&self, area: SubPageAreaId) -> Option<SubPageId> {
        let position = *self.state.active_sub_pages.get(area.0)?;
        self.areas.get(area.0)?.sub_pages.get(position).copied()
    }

    /// Binding currently in force for `control`.
    pub fn resolve(&self, control: ControlId) -> Option<&Binding> {
        self.resolve_index(control).map(|i| &self.bindings[i])
    }

    fn resolve_index(&self, control: ControlId) -> Option<usize> {
        let page = self.state.active_page?;
        for &area in &self.pages[page.0].areas {
            let member = self
                .area_members
                .get(&area)
                .is_some_and(|m| m.contains(&control));
            if !member {
                continue;
            }
            if let Some(sub_page) = self.active_sub_page(area) {
                if let Some(&index) = self.sub_page_bindings.get(&(sub_page, control)) {
                    return Some(index);
                }
            }
        }
        self.page_bindings.get(&(page, control)).copied()
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Run a control event through its active binding.
    pub fn dispatch<H: HostAccess + ?Sized>(
        &mut self,
        event: &ControlEvent,
        host: &mut H,
    ) -> DispatchResult {
        let Some(index) = self.resolve_index(event.control) else {
            trace!("Dropping event for unbound control {}", event.control.index());
            return DispatchResult::default();
        };

        match self.bindings[index].target {
            BindingTarget::Action(action) => {
                if !event.is_press() {
                    return DispatchResult::default();
                }
                DispatchResult {
                    written: None,
                    activations: self.perform(action),
                }
            }
            BindingTarget::Parameter { parameter, .. } => {
                let written = self.bindings[index]
                    .apply(event, host)
                    .map(|value| (parameter, value));
                DispatchResult {
                    written,
                    activations: Activations::new(),
                }
            }
        }
    }

    pub fn perform(&mut self, action: NavigationAction) -> Activations {
        match action {
            NavigationAction::NextPage => self.next_page(),
            NavigationAction::PrevPage => self.prev_page(),
            NavigationAction::NextSubPage(area) => self.next_sub_page(area),
            NavigationAction::PrevSubPage(area) => self.prev_sub_page(area),
            NavigationAction::ActivatePage(page) => self.activate_page(page),
            NavigationAction::ActivateSubPage(sub_page) => self.activate_sub_page(sub_page),
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn next_page(&mut self) -> Activations {
        self.step_page(1)
    }

    pub fn prev_page(&mut self) -> Activations {
        self.step_page(-1)
    }

    fn step_page(&mut self, direction: isize) -> Activations {
        let count = self.pages.len();
        let Some(current) = self.state.active_page else {
            return Activations::new();
        };
        let next = (current.0 as isize + direction).rem_euclid(count as isize) as usize;
        self.enter_page(Some(current), PageId(next))
    }

    /// Make `page` active. Re-activating the active page fires its entry
    /// hooks again without an exit.
    pub fn activate_page(&mut self, page: PageId) -> Activations {
        if self.page(page).is_none() {
            return Activations::new();
        }
        let exited = self.state.active_page.filter(|&current| current != page);
        self.enter_page(exited, page)
    }

    /// Activate the page at `index`, wrapping past the end.
    pub fn activate_page_index(&mut self, index: usize) -> Activations {
        match self.pages.len() {
            0 => Activations::new(),
            count => self.activate_page(PageId(index % count)),
        }
    }

    fn enter_page(&mut self, exited: Option<PageId>, page: PageId) -> Activations {
        let mut activations = Activations::new();
        if let Some(old) = exited {
            activations.push(Activation::PageExited(old));
        }
        self.state.active_page = Some(page);
        activations.push(Activation::PageEntered(page));
        for &area in &self.pages[page.0].areas {
            if let Some(sub_page) = self.active_sub_page(area) {
                activations.push(Activation::SubPageEntered(sub_page));
            }
        }
        self.release_pickups();
        debug!("Page \"{}\" active", self.pages[page.0].name);
        activations
    }

    pub fn next_sub_page(&mut self, area: SubPageAreaId) -> Activations {
        self.step_sub_page(area, 1)
    }

    pub fn prev_sub_page(&mut self, area: SubPageAreaId) -> Activations {
        self.step_sub_page(area, -1)
    }

    fn step_sub_page(&mut self, area: SubPageAreaId, direction: isize) -> Activations {
        let Some(count) = self.area(area).map(|a| a.sub_pages.len()) else {
            return Activations::new();
        };
        if count == 0 {
            return Activations::new();
        }
        let current = self.state.active_sub_pages[area.0] as isize;
        let next = (current + direction).rem_euclid(count as isize) as usize;
        self.enter_sub_page(area, next)
    }

    /// Make `sub_page` the active one of its area. Hooks fire only while
    /// the area's page is active.
    pub fn activate_sub_page(&mut self, sub_page: SubPageId) -> Activations {
        let Some(area) = self.sub_page(sub_page).map(|s| s.area) else {
            return Activations::new();
        };
        let Some(position) = self.areas[area.0]
            .sub_pages
            .iter()
            .position(|&s| s == sub_page)
        else {
            return Activations::new();
        };
        self.enter_sub_page(area, position)
    }

    fn enter_sub_page(&mut self, area: SubPageAreaId, position: usize) -> Activations {
        self.state.active_sub_pages[area.0] = position;
        let sub_page = self.areas[area.0].sub_pages[position];

        let mut activations = Activations::new();
        if self.state.active_page == Some(self.areas[area.0].page) {
            self.release_pickups();
            activations.push(Activation::SubPageEntered(sub_page));
            debug!(
                "Subpage \"{}\" active in \"{}\"",
                self.sub_pages[sub_page.0].name, self.areas[area.0].name
            );
        }
        activations
    }

    fn release_pickups(&mut self) {
        for binding in &mut self.bindings {
            binding.release_pickup();
        }
    }
}
