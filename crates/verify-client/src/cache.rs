//! Single-slot cache for the most recent raw API response

use serde_json::Value;

/// Holds the last raw response payload for later inspection.
///
/// One slot, overwritten on every write; reads always see the latest
/// value. The slot is owned by its call-site and accessed from one
/// logical thread of control, so there is no locking. Nothing is ever
/// merged and nothing survives the owning scope.
#[derive(Debug, Default)]
pub struct LastResponse {
    slot: Option<Value>,
}

impl LastResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot, returning the displaced payload if any.
    pub fn record(&mut self, payload: Value) -> Option<Value> {
        self.slot.replace(payload)
    }

    /// The most recent payload, if one was recorded.
    pub fn get(&self) -> Option<&Value> {
        self.slot.as_ref()
    }

    /// Empty the slot, handing ownership of the payload to the caller.
    pub fn take(&mut self) -> Option<Value> {
        self.slot.take()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn starts_empty() {
        let cache = LastResponse::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn record_overwrites_and_returns_previous() {
        let mut cache = LastResponse::new();

        assert_eq!(cache.record(json!({"valid": true})), None);
        assert_eq!(cache.get(), Some(&json!({"valid": true})));

        let displaced = cache.record(json!({"valid": false}));
        assert_eq!(displaced, Some(json!({"valid": true})));
        assert_eq!(cache.get(), Some(&json!({"valid": false})));
    }

    #[test]
    fn take_empties_the_slot() {
        let mut cache = LastResponse::new();
        cache.record(json!([1, 2, 3]));

        assert_eq!(cache.take(), Some(json!([1, 2, 3])));
        assert!(cache.is_empty());
        assert_eq!(cache.take(), None);
    }
}
