use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Notification emitted by the [`Engine`] after a state change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh board replaced the previous one.
    NewGame {
        preset: Preset,
        size: Coord2,
        mines: CellCount,
    },
    /// Cells that went from hidden to revealed, in reveal order.
    CellsRevealed(Vec<Coord2>),
    FlagToggled { coords: Coord2, flagged: bool },
    /// The driver should deliver one tick per second with this token.
    TimerStarted(TimerToken),
    /// The driver should stop ticking.
    TimerStopped,
    Ticked(u32),
    LifecycleChanged(Lifecycle),
    SettingsChanged(Preset),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u32);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Registered event listeners, called in subscription order.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u32,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn emit(&mut self, event: &GameEvent) {
        log::trace!("Emitting {:?} to {} listeners", event, self.listeners.len());
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
