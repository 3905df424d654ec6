// Copyright (c) 2024 Botho Foundation
//
//! Property-based tests for the tag ledger.
//!
//! Random sequences of calls from a small set of actors must keep the
//! supply invariant and the tag balance bound, and a rejected call must
//! leave the ledger exactly as it was.

use proptest::prelude::*;
use tagging_contract_types::{Address, CallContext, TagId};
use tagging_provider::ProviderRegistry;
use tagging_rewards::RewardsLedger;
use tagging_tags::{ClaimPolicy, TagLedger, TagPolicy};

const OWNER: u8 = 0x10;
const ACTORS: u8 = 4;

fn addr(byte: u8) -> Address {
    Address::new([byte; 20])
}

#[derive(Debug, Clone)]
enum Op {
    Create { actor: u8 },
    Feed { actor: u8, tag: usize },
    Clear { actor: u8, tag: usize },
    Claim { actor: u8, tag: usize },
    Transfer { actor: u8, to: u8, amount: u64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let actor = 0..ACTORS;
    prop_oneof![
        actor.clone().prop_map(|actor| Op::Create { actor }),
        (actor.clone(), any::<usize>()).prop_map(|(actor, tag)| Op::Feed { actor, tag }),
        (actor.clone(), any::<usize>()).prop_map(|(actor, tag)| Op::Clear { actor, tag }),
        (actor.clone(), any::<usize>()).prop_map(|(actor, tag)| Op::Claim { actor, tag }),
        (actor.clone(), actor, 0..40u64)
            .prop_map(|(actor, to, amount)| Op::Transfer { actor, to, amount }),
    ]
}

fn policy_strategy() -> impl Strategy<Value = TagPolicy> {
    (1..=50u64, 1..=20u64, prop::bool::ANY).prop_flat_map(|(max_balance, feed_amount, whole)| {
        (1..=max_balance, 1..=max_balance).prop_map(move |(create_amount, claim)| TagPolicy {
            create_amount,
            feed_amount,
            max_balance,
            claim_policy: if whole {
                ClaimPolicy::WholeBalance
            } else {
                ClaimPolicy::Fixed { amount: claim }
            },
        })
    })
}

struct World {
    providers: ProviderRegistry,
    rewards: RewardsLedger,
    ledger: TagLedger,
    /// Every id ever created, cleared or not
    known: Vec<TagId>,
}

impl World {
    fn new(policy: TagPolicy, supply: u64) -> Self {
        let mut providers = ProviderRegistry::new(addr(0xa0), addr(OWNER));
        // Actors 0 and 1 are providers; 2 and 3 are plain users
        for actor in 0..2 {
            providers
                .register_provider(&CallContext::from_caller(addr(OWNER)), addr(actor))
                .unwrap();
        }
        let rewards = RewardsLedger::new(addr(0xa1));
        let ledger = TagLedger::new(
            addr(0xa2),
            providers.address(),
            rewards.address(),
            supply,
            "Tags",
            "TAG",
            policy,
        )
        .unwrap();
        Self {
            providers,
            rewards,
            ledger,
            known: Vec::new(),
        }
    }

    fn pick(&self, index: usize) -> TagId {
        if self.known.is_empty() {
            TagId::new([0u8; 32])
        } else {
            self.known[index % self.known.len()]
        }
    }

    /// Apply one op; returns whether it succeeded.
    fn apply(&mut self, op: &Op, step: usize) -> bool {
        let entropy = [step as u8; 32];
        match *op {
            Op::Create { actor } => {
                let ctx = CallContext::new(addr(actor), entropy);
                match self.ledger.create_tag(&ctx, &self.providers) {
                    Ok(receipt) => {
                        self.known.extend(receipt.created_tag());
                        true
                    }
                    Err(_) => false,
                }
            }
            Op::Feed { actor, tag } => {
                let tag_id = self.pick(tag);
                self.ledger
                    .feed_tag(&CallContext::new(addr(actor), entropy), tag_id)
                    .is_ok()
            }
            Op::Clear { actor, tag } => {
                let tag_id = self.pick(tag);
                self.ledger
                    .clear_tag(&CallContext::new(addr(actor), entropy), tag_id)
                    .is_ok()
            }
            Op::Claim { actor, tag } => {
                let tag_id = self.pick(tag);
                self.ledger
                    .create_claim_for_tag(
                        &CallContext::new(addr(actor), entropy),
                        tag_id,
                        &mut self.rewards,
                    )
                    .is_ok()
            }
            Op::Transfer { actor, to, amount } => self
                .ledger
                .transfer(&CallContext::new(addr(actor), entropy), addr(to), amount)
                .is_ok(),
        }
    }
}

proptest! {
    /// Property: the supply invariant and the tag bound hold after every call.
    #[test]
    fn prop_invariants_hold(
        policy in policy_strategy(),
        supply in 0..500u64,
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut world = World::new(policy, supply);

        for (step, op) in ops.iter().enumerate() {
            world.apply(op, step);
            prop_assert!(world.ledger.check_invariants().is_ok(), "after {:?}", op);
        }
    }

    /// Property: a rejected call changes nothing.
    #[test]
    fn prop_failed_calls_have_no_effect(
        policy in policy_strategy(),
        supply in 0..500u64,
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut world = World::new(policy, supply);

        for (step, op) in ops.iter().enumerate() {
            let ledger_before = serde_json::to_value(&world.ledger).unwrap();
            let claims_before = world.rewards.claims().len();

            if !world.apply(op, step) {
                prop_assert_eq!(&serde_json::to_value(&world.ledger).unwrap(), &ledger_before);
                prop_assert_eq!(world.rewards.claims().len(), claims_before);
            }
        }
    }

    /// Property: only providers create tags, and each creation yields a new id.
    #[test]
    fn prop_created_ids_are_unique(
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut world = World::new(TagPolicy::default(), 10_000);

        for (step, op) in ops.iter().enumerate() {
            let succeeded = world.apply(op, step);
            if let Op::Create { actor } = op {
                prop_assert_eq!(succeeded, *actor < 2);
            }
        }

        let mut ids = world.known.clone();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), world.known.len());
    }
}
