//! Models exercising marker arguments and field selection.

use deltagen_macros::TrackDelta;

pub mod deltas {
    include!(concat!(env!("OUT_DIR"), "/settings.deltas.rs"));
}

#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
#[delta(suffix = "Changes")]
pub struct Preferences {
    pub theme: String,
    pub font_size: u16,
}

/// Nested preferences are compared as a single value.
#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
#[delta(deep_tracking = false)]
pub struct Snapshot {
    pub label: String,
    pub preferences: Preferences,
}

#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
#[delta(convenience_functions = false)]
pub struct Account {
    pub email: String,
    #[delta(ignore)]
    pub password_hash: String,
    pub(crate) login_count: u32,
    pub r#type: u8,
    secret: u64,
}

impl Account {
    pub fn new(email: &str, login_count: u32, secret: u64) -> Self {
        Account {
            email: email.to_string(),
            login_count,
            secret,
            ..Account::default()
        }
    }

    pub fn secret(&self) -> u64 {
        self.secret
    }
}

/// Fields named like generated members get a trailing `_` accessor.
#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
pub struct Reading {
    pub previous: u32,
    pub current: u32,
}

#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
pub struct Point(pub i32, pub i32);

#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
struct Counter {
    pub count: u32,
}

/// Whether two counter readings differ, as seen through the generated delta.
pub fn counter_changed(previous: u32, current: u32) -> bool {
    use self::deltas::CounterDeltaExt;

    let previous = Counter { count: previous };
    let current = Counter { count: current };
    previous.delta_to(&current).has_any_deltas()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_model_delta_is_usable_from_its_module() {
        assert!(counter_changed(1, 2));
        assert!(!counter_changed(3, 3));
    }

    #[test]
    fn crate_visible_fields_are_tracked() {
        let before = Account::new("a@example.com", 1, 7);
        let after = Account::new("a@example.com", 2, 9);
        let delta = deltas::AccountDelta::new(Some(&before), Some(&after));
        assert!(delta.login_count().has_changed());
        assert_eq!(after.secret(), 9);
    }
}
