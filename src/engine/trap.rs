//! Panic isolation for case bodies.
//!
//! One process-wide panic hook is installed the first time a trap is
//! created. While a [`PanicTrap`] is alive on a thread, panics raised on
//! that thread are not printed; the hook records where the panic happened
//! and the stack at that point instead. Panics on any other thread go to
//! the hook that was installed before ours.

use crate::failure::{Failure, Stack};
use once_cell::sync::Lazy;
use std::any::Any;
use std::collections::HashMap;
use std::panic;
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

#[derive(Debug)]
struct Trapped {
    location: Option<String>,
    stack: Stack,
}

static ACTIVE: Lazy<Mutex<HashMap<ThreadId, Option<Trapped>>>> = Lazy::new(Default::default);
static INSTALL_HOOK: Once = Once::new();

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let id = thread::current().id();
            let trapping = ACTIVE
                .lock()
                .map(|active| active.contains_key(&id))
                .unwrap_or(false);
            if !trapping {
                return previous(info);
            }

            let trapped = Trapped {
                location: info
                    .location()
                    .map(|l| format!("{}:{}", l.file(), l.line())),
                stack: Stack::capture(),
            };
            if let Ok(mut active) = ACTIVE.lock() {
                active.insert(id, Some(trapped));
            }
        }));
    });
}

/// Marks the current thread as running case bodies.
pub(crate) struct PanicTrap {
    owner: ThreadId,
}

impl PanicTrap {
    pub(crate) fn install() -> Self {
        install_hook();
        let owner = thread::current().id();
        if let Ok(mut active) = ACTIVE.lock() {
            active.insert(owner, None);
        }
        Self { owner }
    }

    /// Turns a caught panic payload into a failure.
    pub(crate) fn failure(&self, payload: Box<dyn Any + Send>) -> Failure {
        let message = payload_message(payload.as_ref());
        let trapped = ACTIVE
            .lock()
            .ok()
            .and_then(|mut active| active.get_mut(&self.owner).and_then(Option::take));

        match trapped {
            Some(Trapped {
                location: Some(location),
                stack,
            }) => Failure::new(format!("panicked at {}: {}", location, message), stack),
            Some(Trapped {
                location: None,
                stack,
            }) => Failure::new(format!("panicked: {}", message), stack),
            None => Failure::new(format!("panicked: {}", message), Stack::default()),
        }
    }
}

impl Drop for PanicTrap {
    fn drop(&mut self) {
        if let Ok(mut active) = ACTIVE.lock() {
            active.remove(&self.owner);
        }
    }
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
