//! Driven port implementations for [`MemoryStore`].

use async_trait::async_trait;

use crate::domain::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, StoreError,
    UserRepository,
};
use crate::domain::{
    Category, CategoryId, CategorySlug, Comment, CommentId, CommentText, Location, LocationId,
    NewComment, NewPost, Post, PostDraft, PostId, PostListQuery, PostSlice, PostSummary, Profile,
    StoredCredentials, User, UserId, Username,
};

use super::{CommentRecord, MemoryStore, PostRecord, State};

fn apply_draft(record: &mut PostRecord, draft: &PostDraft) {
    record.title = draft.title().to_owned();
    record.text = draft.text().to_owned();
    record.image = draft.image().map(str::to_owned);
    record.pub_date = draft.pub_date();
    record.is_published = draft.is_published();
    record.location = draft.location_id();
    record.category = draft.category_id();
}

fn hydrate_comment(state: &State, record: &CommentRecord) -> Result<Comment, StoreError> {
    Ok(Comment {
        id: record.id,
        post_id: record.post_id,
        text: record.text.clone(),
        author: record.author,
        author_username: state.username_of(&record.author)?,
        created_at: record.created_at,
    })
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        let state = self.read()?;
        state
            .posts
            .get(&id)
            .map(|record| state.hydrate_post(record))
            .transpose()
    }

    async fn list(&self, query: &PostListQuery) -> Result<PostSlice, StoreError> {
        let state = self.read()?;
        let mut matching = Vec::new();
        for record in state.posts.values() {
            let post = state.hydrate_post(record)?;
            if query.matches(&post) {
                matching.push(post);
            }
        }
        matching.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));

        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(query.page.size()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(size)
            .map(|post| PostSummary {
                comment_count: state.comment_count(post.id),
                post,
            })
            .collect();
        Ok(PostSlice { items, total })
    }

    async fn insert(&self, post: &NewPost) -> Result<Post, StoreError> {
        let mut state = self.write()?;
        if !state.users.contains_key(&post.author) {
            return Err(StoreError::query(format!("unknown author {}", post.author)));
        }
        let mut record = PostRecord {
            id: PostId::new(state.next_id()),
            title: String::new(),
            text: String::new(),
            image: None,
            pub_date: post.draft.pub_date(),
            is_published: false,
            author: post.author,
            location: None,
            category: None,
            created_at: post.created_at,
        };
        apply_draft(&mut record, &post.draft);
        let hydrated = state.hydrate_post(&record)?;
        state.posts.insert(record.id, record);
        Ok(hydrated)
    }

    async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Option<Post>, StoreError> {
        let mut state = self.write()?;
        let Some(record) = state.posts.get_mut(&id) else {
            return Ok(None);
        };
        apply_draft(record, draft);
        let record = record.clone();
        state.hydrate_post(&record).map(Some)
    }

    async fn delete(&self, id: PostId) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        if state.posts.remove(&id).is_none() {
            return Ok(false);
        }
        state.comments.retain(|_, comment| comment.post_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, StoreError> {
        let state = self.read()?;
        let mut records: Vec<&CommentRecord> = state
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        records
            .into_iter()
            .map(|record| hydrate_comment(&state, record))
            .collect()
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, StoreError> {
        let state = self.read()?;
        state
            .comments
            .get(&id)
            .map(|record| hydrate_comment(&state, record))
            .transpose()
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        let mut state = self.write()?;
        if !state.posts.contains_key(&comment.post_id) {
            return Err(StoreError::query(format!(
                "unknown post {}",
                comment.post_id
            )));
        }
        let record = CommentRecord {
            id: CommentId::new(state.next_id()),
            post_id: comment.post_id,
            text: comment.text.as_str().to_owned(),
            author: comment.author,
            created_at: comment.created_at,
        };
        let hydrated = hydrate_comment(&state, &record)?;
        state.comments.insert(record.id, record);
        Ok(hydrated)
    }

    async fn update_text(
        &self,
        id: CommentId,
        text: &CommentText,
    ) -> Result<Option<Comment>, StoreError> {
        let mut state = self.write()?;
        let Some(record) = state.comments.get_mut(&id) else {
            return Ok(None);
        };
        text.as_str().clone_into(&mut record.text);
        let record = record.clone();
        hydrate_comment(&state, &record).map(Some)
    }

    async fn delete(&self, id: CommentId) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        Ok(state.comments.remove(&id).is_some())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_by_slug(&self, slug: &CategorySlug) -> Result<Option<Category>, StoreError> {
        let state = self.read()?;
        Ok(state
            .categories
            .values()
            .find(|category| &category.slug == slug)
            .cloned())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    async fn list_published(&self) -> Result<Vec<Category>, StoreError> {
        let state = self.read()?;
        let mut published: Vec<Category> = state
            .categories
            .values()
            .filter(|category| category.is_published)
            .cloned()
            .collect();
        published.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(published)
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, StoreError> {
        Ok(self.read()?.locations.get(&id).cloned())
    }

    async fn list_published(&self) -> Result<Vec<Location>, StoreError> {
        let state = self.read()?;
        let mut published: Vec<Location> = state
            .locations
            .values()
            .filter(|location| location.is_published)
            .cloned()
            .collect();
        published.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(published)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.users.get(id).map(|record| record.user.clone()))
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
        let state = self.read()?;
        Ok(state
            .users
            .values()
            .find(|record| &record.user.username == username)
            .map(|record| record.user.clone()))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, StoreError> {
        let state = self.read()?;
        Ok(state
            .users
            .values()
            .find(|record| record.user.username.as_str() == username)
            .map(|record| StoredCredentials {
                user_id: record.user.id,
                digest: record.digest.clone(),
            }))
    }

    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, StoreError> {
        let state = self.read()?;
        let Some(profile) = state.profiles.get(user_id) else {
            return Ok(None);
        };
        Ok(Some(Profile {
            username: state.username_of(user_id)?,
            ..profile.clone()
        }))
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let mut state = self.write()?;
        if state.username_taken(&profile.username, Some(profile.user_id)) {
            return Err(StoreError::conflict(format!(
                "username {} is taken",
                profile.username
            )));
        }
        let Some(record) = state.users.get_mut(&profile.user_id) else {
            return Err(StoreError::query(format!(
                "unknown user {}",
                profile.user_id
            )));
        };
        record.user.username = profile.username.clone();
        profile.first_name.clone_into(&mut record.user.first_name);
        profile.last_name.clone_into(&mut record.user.last_name);
        profile.email.clone_into(&mut record.user.email);
        state.profiles.insert(profile.user_id, profile.clone());
        Ok(())
    }
}
