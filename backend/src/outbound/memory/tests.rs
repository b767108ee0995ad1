//! Tests for the in-memory store.

use std::sync::Arc;

use chrono::Duration;
use pagination::PageRequest;
use rstest::{fixture, rstest};

use super::MemoryStore;
use crate::domain::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostQuery, PostRepository,
    StoreError, UserRepository,
};
use crate::domain::test_support::{fixed_clock, fixed_now};
use crate::domain::{
    Category, CategorySlug, CommentText, NewComment, NewPost, POSTS_PER_PAGE, Post, PostDraft,
    PostDraftInput, PostListQuery, PostQueryService, PostScope, Profile, User, Username,
    VisibilityRule,
};

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::new(fixed_clock())
}

fn seed_user(store: &MemoryStore, name: &str) -> User {
    store
        .seed_user(Username::new(name).expect("valid username"), "secret")
        .expect("seed user")
}

fn seed_category(store: &MemoryStore, slug: &str) -> Category {
    store
        .seed_category(slug, CategorySlug::new(slug).expect("valid slug"), true)
        .expect("seed category")
}

fn draft(title: &str, hours_ago: i64, category: Option<&Category>) -> PostDraft {
    PostDraft::try_from_input(PostDraftInput {
        title: title.into(),
        text: "Body".into(),
        image: None,
        pub_date: fixed_now() - Duration::hours(hours_ago),
        is_published: true,
        location_id: None,
        category_id: category.map(|c| c.id),
    })
    .expect("valid draft")
}

async fn insert_post(store: &MemoryStore, author: &User, draft: PostDraft) -> Post {
    PostRepository::insert(
        store,
        &NewPost {
            author: author.id,
            draft,
            created_at: fixed_now(),
        },
    )
    .await
    .expect("insert post")
}

async fn insert_comment(store: &MemoryStore, post: &Post, author: &User) {
    CommentRepository::insert(
        store,
        &NewComment {
            post_id: post.id,
            author: author.id,
            text: CommentText::new("Nice").expect("valid text"),
            created_at: fixed_now(),
        },
    )
    .await
    .expect("insert comment");
}

fn public_query(page: u32) -> PostListQuery {
    PostListQuery {
        author: None,
        category: None,
        visibility: VisibilityRule::Public { now: fixed_now() },
        page: PageRequest::new(page, POSTS_PER_PAGE).expect("valid page"),
    }
}

#[rstest]
#[tokio::test]
async fn listing_orders_newest_first_and_pages_by_ten(store: MemoryStore) {
    let author = seed_user(&store, "alice");
    for hours in 1..=12 {
        insert_post(&store, &author, draft(&format!("post {hours}"), hours, None)).await;
    }

    let first = store.list(&public_query(1)).await.expect("first page");
    assert_eq!(first.total, 12);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].post.title, "post 1");

    let second = store.list(&public_query(2)).await.expect("second page");
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.items[1].post.title, "post 12");
}

#[rstest]
#[tokio::test]
async fn listing_hides_future_posts_and_counts_comments(store: MemoryStore) {
    let author = seed_user(&store, "alice");
    let current = insert_post(&store, &author, draft("now", 1, None)).await;
    insert_post(&store, &author, draft("later", -24, None)).await;
    insert_comment(&store, &current, &author).await;
    insert_comment(&store, &current, &author).await;

    let slice = store.list(&public_query(1)).await.expect("listing");
    assert_eq!(slice.total, 1);
    assert_eq!(slice.items[0].comment_count, 2);
}

#[rstest]
#[tokio::test]
async fn deleting_a_category_detaches_its_posts(store: MemoryStore) {
    let author = seed_user(&store, "alice");
    let travel = seed_category(&store, "travel");
    let post = insert_post(&store, &author, draft("trip", 1, Some(&travel))).await;

    assert!(store.delete_category(travel.id).expect("delete category"));

    let reloaded = PostRepository::find_by_id(&store, post.id)
        .await
        .expect("lookup")
        .expect("post survives");
    assert_eq!(reloaded.category, None);
}

#[rstest]
#[tokio::test]
async fn deleting_a_location_detaches_its_posts(store: MemoryStore) {
    let author = seed_user(&store, "alice");
    let lisbon = store.seed_location("Lisbon", true).expect("seed location");
    let input_draft = PostDraft::try_from_input(PostDraftInput {
        title: "trip".into(),
        text: "Body".into(),
        image: None,
        pub_date: fixed_now() - Duration::hours(1),
        is_published: true,
        location_id: Some(lisbon.id),
        category_id: None,
    })
    .expect("valid draft");
    let post = insert_post(&store, &author, input_draft).await;
    assert_eq!(post.location.as_ref().map(|l| l.id), Some(lisbon.id));

    assert!(store.delete_location(lisbon.id).expect("delete location"));

    let reloaded = PostRepository::find_by_id(&store, post.id)
        .await
        .expect("lookup")
        .expect("post survives");
    assert_eq!(reloaded.location, None);
}

#[rstest]
#[tokio::test]
async fn deleting_a_user_cascades_to_posts_and_comments(store: MemoryStore) {
    let alice = seed_user(&store, "alice");
    let bob = seed_user(&store, "bob");
    let alices = insert_post(&store, &alice, draft("alice", 1, None)).await;
    let bobs = insert_post(&store, &bob, draft("bob", 2, None)).await;
    insert_comment(&store, &bobs, &alice).await;
    insert_comment(&store, &alices, &bob).await;

    assert!(store.delete_user(alice.id).expect("delete user"));

    assert!(
        PostRepository::find_by_id(&store, alices.id)
            .await
            .expect("lookup")
            .is_none()
    );
    assert!(store.list_for_post(bobs.id).await.expect("comments").is_empty());
}

#[rstest]
#[tokio::test]
async fn deleting_a_post_removes_its_comments(store: MemoryStore) {
    let author = seed_user(&store, "alice");
    let post = insert_post(&store, &author, draft("gone", 1, None)).await;
    insert_comment(&store, &post, &author).await;

    assert!(PostRepository::delete(&store, post.id).await.expect("delete"));
    assert!(store.list_for_post(post.id).await.expect("comments").is_empty());
    assert!(!PostRepository::delete(&store, post.id).await.expect("second delete"));
}

#[rstest]
fn duplicate_usernames_conflict(store: MemoryStore) {
    seed_user(&store, "alice");
    let err = store
        .seed_user(Username::new("alice").expect("valid username"), "other")
        .expect_err("duplicate");
    assert!(matches!(err, StoreError::Conflict { .. }));
}

#[rstest]
#[tokio::test]
async fn saving_a_profile_renames_the_account(store: MemoryStore) {
    let alice = seed_user(&store, "alice");
    let profile = Profile {
        user_id: alice.id,
        username: Username::new("alicia").expect("valid username"),
        first_name: "Alice".into(),
        last_name: "Liddell".into(),
        email: "alice@example.org".into(),
    };
    store.save_profile(&profile).await.expect("save profile");

    let renamed = store
        .find_by_username(&profile.username)
        .await
        .expect("lookup")
        .expect("renamed user");
    assert_eq!(renamed.id, alice.id);
    assert_eq!(renamed.first_name, "Alice");
    assert_eq!(
        store.find_profile(&alice.id).await.expect("profile"),
        Some(profile)
    );
}

#[rstest]
#[tokio::test]
async fn saving_a_profile_with_a_taken_username_conflicts(store: MemoryStore) {
    let alice = seed_user(&store, "alice");
    seed_user(&store, "bob");
    let profile = Profile {
        user_id: alice.id,
        username: Username::new("bob").expect("valid username"),
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
    };
    let err = store.save_profile(&profile).await.expect_err("taken");
    assert!(matches!(err, StoreError::Conflict { .. }));
}

#[rstest]
#[tokio::test]
async fn published_reference_data_is_title_ordered(store: MemoryStore) {
    store
        .seed_category("Zoo", CategorySlug::new("zoo").expect("slug"), true)
        .expect("seed");
    store
        .seed_category("Art", CategorySlug::new("art").expect("slug"), true)
        .expect("seed");
    store
        .seed_category("Hidden", CategorySlug::new("hidden").expect("slug"), false)
        .expect("seed");
    store.seed_location("Oslo", true).expect("seed");
    store.seed_location("Bergen", false).expect("seed");

    let titles: Vec<String> = CategoryRepository::list_published(&store)
        .await
        .expect("categories")
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, ["Art", "Zoo"]);

    let locations = LocationRepository::list_published(&store)
        .await
        .expect("locations");
    assert_eq!(locations.len(), 1);
}

#[rstest]
#[tokio::test]
async fn credentials_match_the_seeded_password(store: MemoryStore) {
    let alice = seed_user(&store, "alice");
    let stored = store
        .find_credentials("alice")
        .await
        .expect("lookup")
        .expect("credentials");
    assert_eq!(stored.user_id, alice.id);
    assert!(
        stored
            .digest
            .matches(&crate::domain::PasswordDigest::derive(&alice.id, "secret"))
    );
}

#[rstest]
#[tokio::test]
async fn comments_come_back_oldest_first_whatever_the_insert_order(store: MemoryStore) {
    let author = seed_user(&store, "alice");
    let post = insert_post(&store, &author, draft("chatty", 3, None)).await;
    for (text, hours_ago) in [("middle", 2), ("newest", 1), ("oldest", 3)] {
        CommentRepository::insert(
            &store,
            &NewComment {
                post_id: post.id,
                author: author.id,
                text: CommentText::new(text).expect("valid text"),
                created_at: fixed_now() - Duration::hours(hours_ago),
            },
        )
        .await
        .expect("insert comment");
    }

    let texts: Vec<String> = store
        .list_for_post(post.id)
        .await
        .expect("comments")
        .into_iter()
        .map(|comment| comment.text)
        .collect();
    assert_eq!(texts, ["oldest", "middle", "newest"]);
}

#[rstest]
#[tokio::test]
async fn twenty_five_visible_posts_fill_pages_of_ten_ten_and_five(store: MemoryStore) {
    let author = seed_user(&store, "alice");
    for hours in 1..=25 {
        insert_post(&store, &author, draft(&format!("post {hours}"), hours, None)).await;
    }

    let mut sizes = Vec::new();
    for page in 1..=4 {
        let slice = store.list(&public_query(page)).await.expect("page");
        assert_eq!(slice.total, 25);
        sizes.push(slice.items.len());
    }
    assert_eq!(sizes, [10, 10, 5, 0]);
}

#[rstest]
#[tokio::test]
async fn listing_the_index_twice_gives_the_same_page(store: MemoryStore) {
    let author = seed_user(&store, "alice");
    for hours in 1..=4 {
        insert_post(&store, &author, draft("same hour", hours / 2, None)).await;
    }
    let store = Arc::new(store);
    let service = PostQueryService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        fixed_clock(),
    );

    let first = service
        .list_posts(PostScope::All, None, PageRequest::first(POSTS_PER_PAGE))
        .await
        .expect("first listing");
    let second = service
        .list_posts(PostScope::All, None, PageRequest::first(POSTS_PER_PAGE))
        .await
        .expect("second listing");
    assert_eq!(first, second);
    assert_eq!(first.page.items().len(), 4);
}
