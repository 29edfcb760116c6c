//! Public listing, search and per-author query tests.

use super::*;
use crate::store::{MemoryStore, PasteStore, PublicFilter};

fn ids(rows: &[crate::models::PasteWithAuthor]) -> Vec<&str> {
    rows.iter().map(|row| row.paste.id.as_str()).collect()
}

#[test]
fn public_query_is_newest_first_and_filters_private_and_expired() {
    let (db, _temp) = setup_temp_db();
    let now = t0();

    db.pastes.create(&paste_at("oldest0001", "a", "a", 300)).expect("create");
    db.pastes.create(&paste_at("newest0001", "b", "b", 10)).expect("create");
    db.pastes.create(&paste_at("middle0001", "c", "c", 100)).expect("create");

    let mut private = paste_at("private001", "d", "d", 5);
    private.is_public = false;
    db.pastes.create(&private).expect("create");

    let mut expired = paste_at("expired001", "e", "e", 5);
    expired.expires_at = Some(now - Duration::seconds(1));
    db.pastes.create(&expired).expect("create");

    let mut boundary = paste_at("boundary01", "f", "f", 5);
    boundary.expires_at = Some(now);
    db.pastes.create(&boundary).expect("create");

    let mut live = paste_at("expiring01", "g", "g", 50);
    live.expires_at = Some(now + Duration::minutes(10));
    db.pastes.create(&live).expect("create");

    let slice = db
        .pastes
        .query_public(PublicFilter::recent(now), 0, 20)
        .expect("query");
    assert_eq!(slice.total, 4);
    assert_eq!(
        ids(&slice.pastes),
        vec!["newest0001", "expiring01", "middle0001", "oldest0001"]
    );
}

#[test]
fn public_query_windows_after_counting() {
    let (db, _temp) = setup_temp_db();
    for age in 0..45 {
        let id = format!("page{:06}", age);
        db.pastes
            .create(&paste_at(&id, "t", "c", age))
            .expect("create");
    }

    let first = db
        .pastes
        .query_public(PublicFilter::recent(t0()), 0, 20)
        .expect("page 1");
    assert_eq!(first.total, 45);
    assert_eq!(first.pastes.len(), 20);
    assert_eq!(first.pastes[0].paste.id, "page000000");

    let last = db
        .pastes
        .query_public(PublicFilter::recent(t0()), 40, 20)
        .expect("page 3");
    assert_eq!(last.total, 45);
    assert_eq!(ids(&last.pastes), vec!["page000040", "page000041", "page000042", "page000043", "page000044"]);

    let beyond = db
        .pastes
        .query_public(PublicFilter::recent(t0()), 60, 20)
        .expect("page 4");
    assert_eq!(beyond.total, 45);
    assert!(beyond.pastes.is_empty());
}

#[test]
fn search_matches_title_or_content_case_sensitively() {
    let (db, _temp) = setup_temp_db();
    db.pastes
        .create(&paste_at("titlehit01", "Rust tips", "nothing here", 30))
        .expect("create");
    db.pastes
        .create(&paste_at("bodyhit001", "misc", "fn main() { Rust }", 20))
        .expect("create");
    db.pastes
        .create(&paste_at("lowercase1", "rust lower", "rust", 10))
        .expect("create");

    let mut hidden = paste_at("hiddenhit1", "Rust secret", "Rust", 5);
    hidden.is_public = false;
    db.pastes.create(&hidden).expect("create");

    let slice = db
        .pastes
        .query_public(PublicFilter::search(t0(), "Rust"), 0, 20)
        .expect("search");
    assert_eq!(slice.total, 2);
    assert_eq!(ids(&slice.pastes), vec!["bodyhit001", "titlehit01"]);
}

#[test]
fn author_listing_includes_private_and_expired_rows() {
    let (db, _temp) = setup_temp_db();
    let ada = user_named("Ada");
    db.users.create(&ada).expect("create user");

    let mut public = paste_at("adapublic1", "t", "c", 30);
    public.author_id = Some(ada.id.clone());
    db.pastes.create(&public).expect("create");

    let mut private = paste_at("adaprivat1", "t", "c", 20);
    private.author_id = Some(ada.id.clone());
    private.is_public = false;
    db.pastes.create(&private).expect("create");

    let mut expired = paste_at("adaexpire1", "t", "c", 10);
    expired.author_id = Some(ada.id.clone());
    expired.expires_at = Some(t0() - Duration::days(1));
    db.pastes.create(&expired).expect("create");

    db.pastes
        .create(&paste_at("anonymous1", "t", "c", 0))
        .expect("create");

    let owned = db.pastes.list_by_author(&ada.id).expect("list");
    assert_eq!(ids(&owned), vec!["adaexpire1", "adaprivat1", "adapublic1"]);
    assert!(owned
        .iter()
        .all(|row| row.author.as_ref().map(|a| a.name.as_str()) == Some("Ada")));

    assert!(db.pastes.list_by_author("someone-else").expect("list").is_empty());
}

#[test]
fn redb_and_memory_stores_agree_on_queries() {
    let (db, _temp) = setup_temp_db();
    let memory = MemoryStore::new();
    let now = t0();

    for (index, title) in ["alpha", "beta", "alphabet", "gamma"].iter().enumerate() {
        let mut paste = paste_at(&format!("agree{:05}", index), title, "body", index as i64 * 7);
        if index == 3 {
            paste.is_public = false;
        }
        db.insert_paste(&paste).expect("redb insert");
        memory.insert_paste(&paste).expect("memory insert");
    }

    for filter in [PublicFilter::recent(now), PublicFilter::search(now, "alpha")] {
        let durable = db.query_public(filter, 0, 2).expect("redb query");
        let volatile = memory.query_public(filter, 0, 2).expect("memory query");
        assert_eq!(durable, volatile);
    }
}
