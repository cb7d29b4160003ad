//! Generated inputs for the interchangeability of the two adapter pairs:
//! arbitrary Unicode, percent sequences and ids far longer than any header.

mod common;

use std::sync::{Mutex, OnceLock};

use author_bridge::{AuthorBridge, CreateAuthor};
use proptest::prelude::*;
use tokio::runtime::Runtime;

/// One provider served for every case; property cases run synchronously.
struct Fixture {
    runtime: Runtime,
    pair: Mutex<common::Pair>,
}

fn fixture() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let pair = runtime.block_on(common::pair());
        Fixture {
            runtime,
            pair: Mutex::new(pair),
        }
    })
}

fn pair() -> common::Pair {
    fixture().pair.lock().unwrap().clone()
}

fn arb_id() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "(%[0-9A-Fa-f]{2}|%|[ a-z]){0,24}",
        "[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}",
        (0usize..2).prop_map(|index| pair().seeded[index].clone()),
        (1_000usize..40_000, any::<char>()).prop_map(|(len, c)| c.to_string().repeat(len)),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[ \\t]{0,3}(%[0-9A-Fa-f]{2}|[a-zé ]){0,120}",
        (90usize..110).prop_map(|len| "ß".repeat(len)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn get_author_is_transparent(id in arb_id()) {
        let pair = pair();
        let (local, remote) = fixture().runtime.block_on(async {
            (pair.in_process.get_author(&id).await, pair.remote.get_author(&id).await)
        });
        prop_assert_eq!(local, remote);
    }

    #[test]
    fn get_authors_is_transparent(ids in prop::collection::vec(arb_id(), 0..4)) {
        let pair = pair();
        let (local, remote) = fixture().runtime.block_on(async {
            (pair.in_process.get_authors(&ids).await, pair.remote.get_authors(&ids).await)
        });
        prop_assert_eq!(local, remote);
    }

    #[test]
    fn create_author_is_transparent(name in arb_text(), bio in prop::option::of(arb_text())) {
        let pair = pair();
        let request = CreateAuthor { name, bio };
        let (local, remote) = fixture().runtime.block_on(async {
            (
                pair.in_process.create_author(&request).await,
                pair.remote.create_author(&request).await,
            )
        });

        match (local, remote) {
            // Ids are generated per call; everything else must match.
            (Ok(local), Ok(remote)) => {
                prop_assert_eq!(local.name, remote.name);
                prop_assert_eq!(local.bio, remote.bio);
            }
            (local, remote) => prop_assert_eq!(local, remote),
        }
    }
}
