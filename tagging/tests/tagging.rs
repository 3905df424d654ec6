// Copyright (c) 2024 Botho Foundation

//! End-to-end scenarios against a full deployment.

use assert_matches::assert_matches;
use std::thread;
use tagging::{CallError, Config, Deployment, SharedDeployment};
use tagging_contract_types::{Address, Event, TagId};
use tagging_provider::{ProviderDirectory, ProviderError};
use tagging_tags::TagError;
use tempfile::tempdir;

struct Accounts {
    owner: Address,
    provider_1: Address,
    provider_2: Address,
    user_1: Address,
    user_2: Address,
}

const ACCOUNTS: Accounts = Accounts {
    owner: Address::new([0x01; 20]),
    provider_1: Address::new([0x11; 20]),
    provider_2: Address::new([0x12; 20]),
    user_1: Address::new([0x21; 20]),
    user_2: Address::new([0x22; 20]),
};

/// Deploy and register both providers. Registration runs twice to show it
/// is idempotent.
fn setup() -> Deployment {
    let mut config = Config::new(ACCOUNTS.owner);
    config.deployment.entropy_seed = Some(1);
    let mut deployment = Deployment::deploy(&config).unwrap();

    for _ in 0..2 {
        for provider in [ACCOUNTS.provider_1, ACCOUNTS.provider_2] {
            deployment
                .register_provider(ACCOUNTS.owner, provider)
                .unwrap();
        }
    }
    assert_eq!(deployment.providers().len(), 2);
    deployment
}

fn create_tag(deployment: &mut Deployment, provider: Address) -> TagId {
    deployment
        .create_tag(provider)
        .unwrap()
        .created_tag()
        .unwrap()
}

#[test]
fn initial_supply_is_held_by_the_ledger() {
    let deployment = setup();
    let tags = deployment.tags();

    assert_eq!(tags.total_supply(), 1000);
    assert_eq!(tags.balance_of(&tags.address()), 1000);
    assert_eq!(tags.treasury(), 1000);
    assert_eq!(tags.balance_of(&ACCOUNTS.user_1), 0);
}

#[test]
fn only_the_owner_registers_providers() {
    let mut deployment = setup();

    assert_matches!(
        deployment.register_provider(ACCOUNTS.user_1, ACCOUNTS.user_2),
        Err(CallError::Provider(ProviderError::Unauthorized { caller })) if caller == ACCOUNTS.user_1
    );
    assert!(!deployment.providers().is_provider(&ACCOUNTS.user_2));

    // Repeat registration applies but emits nothing
    let receipt = deployment
        .register_provider(ACCOUNTS.owner, ACCOUNTS.provider_1)
        .unwrap();
    assert!(receipt.logs.is_empty());
}

#[test]
fn non_provider_cannot_create_tag() {
    let mut deployment = setup();
    let events_before = deployment.events().len();

    assert_matches!(
        deployment.create_tag(ACCOUNTS.user_1),
        Err(CallError::Tags(TagError::Forbidden { caller })) if caller == ACCOUNTS.user_1
    );

    assert_eq!(deployment.tags().tags().count(), 0);
    assert_eq!(deployment.events().len(), events_before);
    assert_eq!(deployment.tags().treasury(), 1000);
}

#[test]
fn provider_creates_tag() {
    let mut deployment = setup();

    let receipt = deployment.create_tag(ACCOUNTS.provider_1).unwrap();
    assert_eq!(receipt.logs.len(), 1);
    let tag_id = receipt.created_tag().unwrap();
    assert_eq!(
        receipt.logs[0],
        Event::TagIdGenerated {
            creator: ACCOUNTS.provider_1,
            tag_id
        }
    );

    let tag = deployment.tags().tag(&tag_id).unwrap();
    assert_eq!(tag.balance, 50);
    assert_eq!(tag.provider, ACCOUNTS.provider_1);
    assert_eq!(deployment.tags().treasury(), 950);

    let other = create_tag(&mut deployment, ACCOUNTS.provider_2);
    assert_ne!(other, tag_id);
    assert_eq!(deployment.tags().treasury(), 900);
}

#[test]
fn feeding_stops_at_the_maximum() {
    let mut config = Config::new(ACCOUNTS.owner);
    config.tags.create_amount = 20;
    let mut deployment = Deployment::deploy(&config).unwrap();
    deployment
        .register_provider(ACCOUNTS.owner, ACCOUNTS.provider_1)
        .unwrap();
    let tag_id = create_tag(&mut deployment, ACCOUNTS.provider_1);

    // 20 -> 30 -> 40 -> 50
    for expected in [30, 40, 50] {
        deployment.feed_tag(ACCOUNTS.user_1, tag_id).unwrap();
        assert_eq!(deployment.tags().tag(&tag_id).unwrap().balance, expected);
    }
    assert_eq!(deployment.tags().treasury(), 950);

    assert_matches!(
        deployment.feed_tag(ACCOUNTS.user_1, tag_id),
        Err(CallError::Tags(TagError::TagAtMaximum(id))) if id == tag_id
    );
    assert_eq!(deployment.tags().tag(&tag_id).unwrap().balance, 50);
    assert_eq!(deployment.tags().treasury(), 950);
}

#[test]
fn feeding_a_full_new_tag_fails() {
    let mut deployment = setup();
    let tag_id = create_tag(&mut deployment, ACCOUNTS.provider_1);

    assert_matches!(
        deployment.feed_tag(ACCOUNTS.provider_1, tag_id),
        Err(CallError::Tags(TagError::TagAtMaximum(_)))
    );
}

#[test]
fn only_the_creating_provider_clears() {
    let mut deployment = setup();
    let tag_id = create_tag(&mut deployment, ACCOUNTS.provider_1);

    assert_matches!(
        deployment.clear_tag(ACCOUNTS.provider_2, tag_id),
        Err(CallError::Tags(TagError::Forbidden { caller })) if caller == ACCOUNTS.provider_2
    );
    assert!(deployment.tags().tag(&tag_id).is_some());

    let receipt = deployment.clear_tag(ACCOUNTS.provider_1, tag_id).unwrap();
    assert_eq!(receipt.logs, vec![Event::TagIdRemoved { tag_id }]);
    assert!(deployment.tags().tag(&tag_id).is_none());
    assert_eq!(deployment.tags().treasury(), 1000);

    assert_matches!(
        deployment.clear_tag(ACCOUNTS.provider_1, tag_id),
        Err(CallError::Tags(TagError::NotFound(_)))
    );
}

#[test]
fn claim_moves_value_from_tag_to_claimant() {
    let mut deployment = setup();
    let tag_id = create_tag(&mut deployment, ACCOUNTS.provider_1);

    let receipt = deployment
        .create_claim_for_tag(ACCOUNTS.user_1, tag_id)
        .unwrap();
    assert_eq!(
        receipt.logs,
        vec![Event::ClaimGenerated {
            tag_id,
            claimant: ACCOUNTS.user_1,
            amount: 10,
            claim_id: 0,
        }]
    );

    assert_eq!(deployment.tags().tag(&tag_id).unwrap().balance, 40);
    assert_eq!(deployment.tags().balance_of(&ACCOUNTS.user_1), 10);
    assert_eq!(deployment.rewards().rewards_of(&ACCOUNTS.user_1), 10);
    assert_eq!(deployment.rewards().claims().len(), 1);

    // Feeding refills what the claim took
    deployment.feed_tag(ACCOUNTS.user_2, tag_id).unwrap();
    assert_eq!(deployment.tags().tag(&tag_id).unwrap().balance, 50);
    deployment.tags().check_invariants().unwrap();
}

#[test]
fn claimed_tokens_can_be_transferred() {
    let mut deployment = setup();
    let tag_id = create_tag(&mut deployment, ACCOUNTS.provider_1);
    deployment
        .create_claim_for_tag(ACCOUNTS.user_1, tag_id)
        .unwrap();

    deployment
        .transfer(ACCOUNTS.user_1, ACCOUNTS.user_2, 4)
        .unwrap();
    assert_eq!(deployment.tags().balance_of(&ACCOUNTS.user_1), 6);
    assert_eq!(deployment.tags().balance_of(&ACCOUNTS.user_2), 4);

    deployment
        .approve(ACCOUNTS.user_2, ACCOUNTS.user_1, 3)
        .unwrap();
    deployment
        .transfer_from(ACCOUNTS.user_1, ACCOUNTS.user_2, ACCOUNTS.owner, 3)
        .unwrap();
    assert_eq!(deployment.tags().balance_of(&ACCOUNTS.owner), 3);
    assert_eq!(deployment.tags().allowance(&ACCOUNTS.user_2, &ACCOUNTS.user_1), 0);

    assert_matches!(
        deployment.transfer(ACCOUNTS.user_2, ACCOUNTS.user_1, 2),
        Err(CallError::Tags(TagError::InsufficientBalance { .. }))
    );
    deployment.tags().check_invariants().unwrap();
}

#[test]
fn concurrent_callers_keep_invariants() {
    let mut deployment = setup();
    let tag_ids: Vec<TagId> = (0..4)
        .map(|_| create_tag(&mut deployment, ACCOUNTS.provider_1))
        .collect();
    let shared = SharedDeployment::new(deployment);

    let handles: Vec<_> = (0..4u8)
        .map(|worker| {
            let shared = shared.clone();
            let tag_ids = tag_ids.clone();
            thread::spawn(move || {
                let caller = Address::new([0x30 + worker; 20]);
                for round in 0..25 {
                    let tag_id = tag_ids[(worker as usize + round) % tag_ids.len()];
                    // Claims and feeds race on the same tags; rejections are fine
                    let _ = shared.create_claim_for_tag(caller, tag_id);
                    let _ = shared.feed_tag(caller, tag_id);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    shared.check_invariants().unwrap();
    for tag_id in &tag_ids {
        assert!(shared.tag(tag_id).unwrap().balance <= 50);
    }

    let deployment = shared.into_inner().ok().unwrap();
    let claimed: u64 = (0..4u8)
        .map(|worker| deployment.tags().balance_of(&Address::new([0x30 + worker; 20])))
        .sum();
    let rewarded: u64 = deployment.rewards().claims().iter().map(|c| c.amount).sum();
    assert_eq!(claimed, rewarded);
}

#[test]
fn deployment_survives_a_restart() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let state_path = tagging::config::state_path_from_config(&config_path);

    let mut config = Config::new(ACCOUNTS.owner);
    config.token.initial_supply = 500;
    config.save(&config_path).unwrap();

    let mut deployment = Deployment::deploy(&Config::load(&config_path).unwrap()).unwrap();
    deployment
        .register_provider(ACCOUNTS.owner, ACCOUNTS.provider_1)
        .unwrap();
    let tag_id = create_tag(&mut deployment, ACCOUNTS.provider_1);
    deployment.save(&state_path).unwrap();
    drop(deployment);

    let mut restored = Deployment::load(&state_path).unwrap();
    assert_eq!(restored.tags().treasury(), 450);
    assert!(restored.providers().is_provider(&ACCOUNTS.provider_1));

    restored
        .create_claim_for_tag(ACCOUNTS.user_1, tag_id)
        .unwrap();
    restored.clear_tag(ACCOUNTS.provider_1, tag_id).unwrap();
    assert_eq!(restored.tags().treasury(), 490);
    assert_eq!(restored.tags().balance_of(&ACCOUNTS.user_1), 10);
    assert_eq!(restored.events().len(), 4);
}
