/// Identifies one credit subscription attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Identifies one in-flight click gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GateId(pub u64);

/// Monotonic id source shared by every slice.
#[derive(Debug, Default)]
pub struct IdSeq {
    next: u64,
}

impl IdSeq {
    fn next_raw(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }

    pub fn next_subscription(&mut self) -> SubscriptionId {
        SubscriptionId(self.next_raw())
    }

    pub fn next_gate(&mut self) -> GateId {
        GateId(self.next_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_never_repeat_across_kinds() {
        let mut seq = IdSeq::default();
        let a = seq.next_subscription();
        let b = seq.next_gate();
        let c = seq.next_subscription();
        assert_ne!(a.0, b.0);
        assert_ne!(b.0, c.0);
        assert_ne!(a, c);
    }
}
