//! Diesel table definitions. Must match `migrations/` exactly.

diesel::table! {
    /// Accounts. Passwords are stored only as salted digests.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        password_digest -> Varchar,
        date_joined -> Timestamptz,
    }
}

diesel::table! {
    /// Editable profile copy of the account's personal details.
    profiles (user_id) {
        user_id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
    }
}

diesel::table! {
    categories (id) {
        id -> Int8,
        title -> Varchar,
        description -> Text,
        slug -> Varchar,
        is_published -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    locations (id) {
        id -> Int8,
        title -> Varchar,
        is_published -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    posts (id) {
        id -> Int8,
        title -> Varchar,
        text -> Text,
        image -> Nullable<Text>,
        pub_date -> Timestamptz,
        is_published -> Bool,
        author_id -> Uuid,
        location_id -> Nullable<Int8>,
        category_id -> Nullable<Int8>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    comments (id) {
        id -> Int8,
        text -> Text,
        post_id -> Int8,
        author_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(profiles -> users (user_id));
diesel::joinable!(posts -> users (author_id));
diesel::joinable!(posts -> categories (category_id));
diesel::joinable!(posts -> locations (location_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(comments -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(
    users, profiles, categories, locations, posts, comments,
);
