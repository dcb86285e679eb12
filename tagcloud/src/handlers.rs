//! Interaction handlers and their composition.
//!
//! A cloud can carry one handler per [`EventKind`], and so can every element
//! a renderer returns. [`compose`] merges the two so that neither replaces
//! the other: the cloud handler runs first with the tag, then the element's
//! own handler runs with the bare event.

use std::fmt;
use std::rc::Rc;

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use tracing::warn;

use crate::error::CloudError;
use crate::render::TagElement;
use crate::tag::Tag;

const EVENT_KINDS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Click,
    DoubleClick,
    MouseMove,
    MouseOver,
    MouseOut,
    Press,
    PressIn,
    PressOut,
}

impl EventKind {
    pub const ALL: [EventKind; EVENT_KINDS] = [
        EventKind::Click,
        EventKind::DoubleClick,
        EventKind::MouseMove,
        EventKind::MouseOver,
        EventKind::MouseOut,
        EventKind::Press,
        EventKind::PressIn,
        EventKind::PressOut,
    ];

    /// Host property name for the handler slot.
    pub const fn prop_name(self) -> &'static str {
        match self {
            EventKind::Click => "onClick",
            EventKind::DoubleClick => "onDoubleClick",
            EventKind::MouseMove => "onMouseMove",
            EventKind::MouseOver => "onMouseOver",
            EventKind::MouseOut => "onMouseOut",
            EventKind::Press => "onPress",
            EventKind::PressIn => "onPressIn",
            EventKind::PressOut => "onPressOut",
        }
    }

    /// Case-insensitive lookup by host property name.
    pub fn from_prop_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.prop_name().eq_ignore_ascii_case(name))
    }

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionEvent {
    pub kind: EventKind,
    pub position: Option<(f64, f64)>,
}

impl InteractionEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            position: None,
        }
    }

    pub fn at(kind: EventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Some((x, y)),
        }
    }
}

pub type CloudHandler = Rc<dyn Fn(&Tag, &InteractionEvent)>;
pub type ElementHandler = Rc<dyn Fn(&InteractionEvent)>;

/// Cloud-wide handlers, called with the tag an event happened on.
#[derive(Clone, Default)]
pub struct CloudHandlers {
    slots: [Option<CloudHandler>; EVENT_KINDS],
}

impl CloudHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, kind: EventKind, handler: impl Fn(&Tag, &InteractionEvent) + 'static) -> Self {
        self.slots[kind.index()] = Some(Rc::new(handler));
        self
    }

    pub fn get(&self, kind: EventKind) -> Option<&CloudHandler> {
        self.slots[kind.index()].as_ref()
    }

    pub fn bound(&self) -> impl Iterator<Item = EventKind> + '_ {
        EventKind::ALL
            .into_iter()
            .filter(|kind| self.slots[kind.index()].is_some())
    }
}

impl fmt::Debug for CloudHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.bound()).finish()
    }
}

/// Handlers bound to a single rendered element.
#[derive(Clone, Default)]
pub struct ElementHandlers {
    slots: [Option<ElementHandler>; EVENT_KINDS],
}

impl ElementHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, kind: EventKind, handler: impl Fn(&InteractionEvent) + 'static) -> Self {
        self.set(kind, Rc::new(handler));
        self
    }

    pub fn set(&mut self, kind: EventKind, handler: ElementHandler) {
        self.slots[kind.index()] = Some(handler);
    }

    pub fn get(&self, kind: EventKind) -> Option<&ElementHandler> {
        self.slots[kind.index()].as_ref()
    }

    pub fn is_bound(&self, kind: EventKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    pub fn bound(&self) -> impl Iterator<Item = EventKind> + '_ {
        EventKind::ALL.into_iter().filter(|kind| self.is_bound(*kind))
    }

    /// Runs the handler for `event.kind`. Returns whether one was bound.
    pub fn dispatch(&self, event: &InteractionEvent) -> bool {
        match self.get(event.kind) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ElementHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.bound()).finish()
    }
}

/// Serialized as the list of bound host property names.
impl Serialize for ElementHandlers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bound: Vec<&str> = self.bound().map(EventKind::prop_name).collect();
        let mut seq = serializer.serialize_seq(Some(bound.len()))?;
        for name in bound {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

/// Merges `cloud` handlers into `element` for `tag`.
///
/// Only slots where the cloud or the element has a handler are replaced;
/// everything else on the element is kept as is. An attribute named like a
/// handler slot is a handler that cannot be called and is rejected.
pub fn compose(
    mut element: TagElement,
    tag: &Tag,
    cloud: &CloudHandlers,
) -> Result<TagElement, CloudError> {
    if let Some(name) = element
        .attributes
        .keys()
        .find(|name| EventKind::from_prop_name(name).is_some())
    {
        warn!(handler = %name, tag = %tag.value, "handler attribute is not callable");
        return Err(CloudError::HandlerNotCallable {
            name: name.clone(),
            tag: tag.value.clone(),
        });
    }

    for kind in EventKind::ALL {
        let cloud_handler = cloud.get(kind).cloned();
        let original = element.handlers.get(kind).cloned();
        if cloud_handler.is_none() && original.is_none() {
            continue;
        }

        let tag = tag.clone();
        element.handlers.set(
            kind,
            Rc::new(move |event: &InteractionEvent| {
                if let Some(handler) = &cloud_handler {
                    handler(&tag, event);
                }
                if let Some(handler) = &original {
                    handler(event);
                }
            }),
        );
    }

    Ok(element)
}
