//! Credit reducer.
//!
//! Invariant: at most one subscription is live. Every path that opens a
//! subscription tears the previous one down first, and a teardown handle that
//! arrives for a superseded subscription is torn down on arrival.

use cart_core::SubscriptionError;
use cart_core::config::CreditConfig;
use cart_core::ports::{CreditRecord, Unsubscribe};

use crate::common::{IdSeq, SubscriptionId};
use crate::credit::{ActiveSubscription, CreditState, UserIdentity};
use crate::effects::CartEffect;

const REPORT_SOURCE: &str = "credit subscription";

/// Resubscribes for a new user, or tears down when the user signs out.
pub fn handle_identity_changed(
    credit: &mut CreditState,
    ids: &mut IdSeq,
    config: &CreditConfig,
    identity: Option<UserIdentity>,
) -> Vec<CartEffect> {
    let mut effects = reset(credit);
    let Some(identity) = identity else {
        return effects;
    };

    let id = ids.next_subscription();
    let key = config.key_for(&identity.uid);
    tracing::debug!(uid = %identity.uid, %key, "opening credit subscription");
    credit.install(ActiveSubscription {
        id,
        uid: identity.uid,
        handle: None,
    });
    effects.push(CartEffect::Subscribe { id, key });
    effects
}

/// Tears down the live subscription (if any) and zeroes the credit.
pub fn reset(credit: &mut CreditState) -> Vec<CartEffect> {
    credit.zero();
    let Some(previous) = credit.take_subscription() else {
        return vec![];
    };
    tracing::debug!(uid = %previous.uid, "closing credit subscription");
    previous
        .handle
        .map(|handle| CartEffect::Unsubscribe { handle })
        .into_iter()
        .collect()
}

/// Stores the teardown handle for the current subscription.
pub fn handle_opened(
    credit: &mut CreditState,
    id: SubscriptionId,
    handle: Unsubscribe,
) -> Vec<CartEffect> {
    match credit.subscription_mut() {
        Some(active) if active.id == id => {
            active.handle = Some(handle);
            vec![]
        }
        _ => {
            tracing::debug!(?id, "tearing down superseded credit subscription");
            vec![CartEffect::Unsubscribe { handle }]
        }
    }
}

pub fn handle_value(credit: &mut CreditState, id: SubscriptionId, record: CreditRecord) {
    if !credit.is_current(id) {
        return;
    }
    credit.set_amount(record.credit);
}

/// Zeroes the credit. A missing record is the normal "no credit yet" state;
/// anything else is reported.
pub fn handle_error(
    credit: &mut CreditState,
    id: SubscriptionId,
    error: SubscriptionError,
) -> Vec<CartEffect> {
    if !credit.is_current(id) {
        return vec![];
    }
    credit.zero();
    if error.is_not_found() {
        return vec![];
    }
    vec![CartEffect::Report {
        source: REPORT_SOURCE,
        error,
    }]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::credit::ZERO_CREDIT;

    fn counting_handle(counter: &Arc<AtomicUsize>) -> Unsubscribe {
        let counter = Arc::clone(counter);
        Unsubscribe::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn subscribe_ids(effects: &[CartEffect]) -> Vec<(SubscriptionId, String)> {
        effects
            .iter()
            .filter_map(|e| match e {
                CartEffect::Subscribe { id, key } => Some((*id, key.collection.clone())),
                _ => None,
            })
            .collect()
    }

    fn run_unsubscribes(effects: Vec<CartEffect>) -> usize {
        let mut count = 0;
        for effect in effects {
            if let CartEffect::Unsubscribe { handle } = effect {
                handle.unsubscribe();
                count += 1;
            }
        }
        count
    }

    fn sign_in(
        credit: &mut CreditState,
        ids: &mut IdSeq,
        uid: &str,
    ) -> (SubscriptionId, Vec<CartEffect>) {
        let mut effects = handle_identity_changed(
            credit,
            ids,
            &CreditConfig::default(),
            Some(UserIdentity::new(uid)),
        );
        let (id, _) = subscribe_ids(&effects)[0].clone();
        effects.retain(|e| !matches!(e, CartEffect::Subscribe { .. }));
        (id, effects)
    }

    #[test]
    fn test_sign_in_subscribes_with_user_key() {
        let mut credit = CreditState::default();
        let mut ids = IdSeq::default();

        let effects = handle_identity_changed(
            &mut credit,
            &mut ids,
            &CreditConfig::default(),
            Some(UserIdentity::new("u1")),
        );

        let subs = subscribe_ids(&effects);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].1, "users/u1/credit");
        assert!(credit.is_current(subs[0].0));
    }

    #[test]
    fn test_switching_users_tears_down_previous() {
        let mut credit = CreditState::default();
        let mut ids = IdSeq::default();
        let u1_teardowns = Arc::new(AtomicUsize::new(0));

        let (u1, _) = sign_in(&mut credit, &mut ids, "u1");
        assert!(handle_opened(&mut credit, u1, counting_handle(&u1_teardowns)).is_empty());

        let (u2, effects) = sign_in(&mut credit, &mut ids, "u2");
        assert_eq!(run_unsubscribes(effects), 1);
        assert_eq!(u1_teardowns.load(Ordering::SeqCst), 1);

        let active = credit.subscription().unwrap();
        assert_eq!(active.id, u2);
        assert_eq!(active.uid, "u2");
    }

    #[test]
    fn test_late_handle_for_superseded_subscription_is_torn_down() {
        let mut credit = CreditState::default();
        let mut ids = IdSeq::default();
        let stale = Arc::new(AtomicUsize::new(0));

        let (u1, _) = sign_in(&mut credit, &mut ids, "u1");
        let (u2, _) = sign_in(&mut credit, &mut ids, "u2");

        let effects = handle_opened(&mut credit, u1, counting_handle(&stale));
        assert_eq!(run_unsubscribes(effects), 1);
        assert_eq!(stale.load(Ordering::SeqCst), 1);
        assert!(credit.is_current(u2));
    }

    #[test]
    fn test_value_updates_credit() {
        let mut credit = CreditState::default();
        let mut ids = IdSeq::default();
        let (id, _) = sign_in(&mut credit, &mut ids, "u1");

        handle_value(&mut credit, id, CreditRecord::new("12.50"));
        assert_eq!(credit.amount(), "12.50");
    }

    #[test]
    fn test_stale_value_is_ignored() {
        let mut credit = CreditState::default();
        let mut ids = IdSeq::default();
        let (old, _) = sign_in(&mut credit, &mut ids, "u1");
        sign_in(&mut credit, &mut ids, "u2");

        handle_value(&mut credit, old, CreditRecord::new("99.00"));
        assert_eq!(credit.amount(), ZERO_CREDIT);
    }

    #[test]
    fn test_not_found_zeroes_silently() {
        let mut credit = CreditState::default();
        let mut ids = IdSeq::default();
        let (id, _) = sign_in(&mut credit, &mut ids, "u1");
        handle_value(&mut credit, id, CreditRecord::new("5.00"));

        let effects = handle_error(&mut credit, id, SubscriptionError::NotFound);

        assert!(effects.is_empty());
        assert_eq!(credit.amount(), ZERO_CREDIT);
    }

    #[test]
    fn test_other_error_zeroes_and_reports_once() {
        let mut credit = CreditState::default();
        let mut ids = IdSeq::default();
        let (id, _) = sign_in(&mut credit, &mut ids, "u1");
        handle_value(&mut credit, id, CreditRecord::new("5.00"));

        let effects = handle_error(
            &mut credit,
            id,
            SubscriptionError::Other("permission denied".to_string()),
        );

        assert_eq!(credit.amount(), ZERO_CREDIT);
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            CartEffect::Report { error: SubscriptionError::Other(msg), .. } if msg == "permission denied"
        ));
    }

    #[test]
    fn test_sign_out_and_reset_are_idempotent() {
        let mut credit = CreditState::default();
        let mut ids = IdSeq::default();
        let teardowns = Arc::new(AtomicUsize::new(0));
        let (id, _) = sign_in(&mut credit, &mut ids, "u1");
        handle_opened(&mut credit, id, counting_handle(&teardowns));
        handle_value(&mut credit, id, CreditRecord::new("3.00"));

        let effects =
            handle_identity_changed(&mut credit, &mut ids, &CreditConfig::default(), None);
        assert_eq!(run_unsubscribes(effects), 1);
        assert!(reset(&mut credit).is_empty());
        assert!(reset(&mut credit).is_empty());

        assert_eq!(teardowns.load(Ordering::SeqCst), 1);
        assert_eq!(credit.amount(), ZERO_CREDIT);
        assert!(credit.subscription().is_none());
    }
}
