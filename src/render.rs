//! Plain-text rendering of screen states.
//!
//! Every function here is pure: state in, text out. Ids are printed in
//! brackets so they can be passed to the next command.

use chrono::{DateTime, Local, Utc};

use crate::api::{Author, Comment};
use crate::ui::compose::ComposeState;
use crate::ui::discussions::DiscussionsState;
use crate::ui::notice::Notice;
use crate::ui::post_detail::{CommentsState, PostPageState};
use crate::ui::post_list::PostListState;
use crate::ui::preview::preview;
use crate::ui::profile::{MeSection, MeState, SectionState, UserPageState};
use crate::ui::search::SearchState;

fn timestamp(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn author_name(author: &Author) -> &str {
    author.display_name().unwrap_or("unknown")
}

fn push_notice(lines: &mut Vec<String>, notice: Option<&Notice>) {
    if let Some(notice) = notice {
        lines.push(notice.to_string());
    }
}

fn push_comment(lines: &mut Vec<String>, comment: &Comment, username: Option<&str>, indent: &str) {
    let author = author_name(&comment.user);
    let when = comment
        .created_at
        .as_ref()
        .map(timestamp)
        .unwrap_or_default();
    let own = if username == Some(author) { " (yours)" } else { "" };
    lines.push(format!(
        "{}[{}] {}: {}  {}{}",
        indent, comment.id, author, comment.content, when, own
    ));
}

pub fn render_post_list(state: &PostListState, username: Option<&str>, preview_chars: usize) -> String {
    let mut lines = vec![format!("{} (page {})", state.filter.title(), state.page)];
    push_notice(&mut lines, state.notice.as_ref());

    if state.loading && state.posts.is_empty() {
        lines.push("Loading...".to_string());
    } else if state.posts.is_empty() {
        lines.push("No posts found.".to_string());
    }

    for view in &state.posts {
        let post = &view.post;
        let heart = if view.liked_by_user { "♥" } else { "♡" };
        let author = author_name(&post.author);
        let own = if username == Some(author) { " (yours)" } else { "" };
        lines.push(format!("{}. {} [{}]", view.number, post.title, post.id));
        lines.push(format!("   {}", preview(&post.content, preview_chars)));
        lines.push(format!(
            "   by {} on {}  {} {}{}",
            author,
            timestamp(&post.created_at),
            heart,
            post.like_count,
            own
        ));
    }

    let mut nav = Vec::new();
    if state.has_previous_page() {
        nav.push("prev");
    }
    if state.has_next_page {
        nav.push("next");
    }
    if !nav.is_empty() {
        lines.push(format!("-- {} --", nav.join(" | ")));
    }
    lines.join("\n")
}

pub fn render_post_page(state: &PostPageState) -> String {
    let mut lines = Vec::new();
    push_notice(&mut lines, state.notice.as_ref());
    match &state.post {
        Some(post) => {
            lines.push(format!("{} [{}]", post.title, post.id));
            lines.push(format!(
                "Posted by @{} on {}",
                author_name(&post.author),
                post.created_at.with_timezone(&Local).format("%Y-%m-%d")
            ));
            lines.push(String::new());
            lines.push(post.content.clone());
        }
        None if state.loading => lines.push("Loading post...".to_string()),
        None => {}
    }
    lines.join("\n")
}

pub fn render_comments(state: &CommentsState, username: Option<&str>, preview_chars: usize) -> String {
    let mut lines = Vec::new();
    push_notice(&mut lines, state.notice.as_ref());

    let Some(post) = &state.post else {
        lines.push("Loading post...".to_string());
        return lines.join("\n");
    };

    let ordinal = state
        .ordinal
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string());
    lines.push(format!("{}. {} [{}]", ordinal, post.title, post.id));
    lines.push(format!("   {}", preview(&post.content, preview_chars)));
    lines.push(format!(
        "   By {} on {}",
        author_name(&post.author),
        timestamp(&post.created_at)
    ));
    lines.push(String::new());
    lines.push("Comments".to_string());

    if state.comments.is_empty() {
        lines.push("No comments yet. Be the first to comment!".to_string());
    }
    for comment in &state.comments {
        push_comment(&mut lines, comment, username, "  ");
    }
    if !state.draft.is_empty() {
        lines.push(format!("Draft: {}", state.draft));
    }
    lines.join("\n")
}

pub fn render_search(state: &SearchState) -> String {
    let location = &state.location;
    let mut lines = vec![format!("Search: \"{}\"", location.query)];

    let Some(results) = &state.results else {
        if state.loading {
            lines.push("Searching...".to_string());
        } else if !location.query.trim().is_empty() {
            lines.push("No results.".to_string());
        }
        return lines.join("\n");
    };

    lines.push(format!("Users (page {})", location.user_page));
    if results.users.is_empty() {
        lines.push("  No users found.".to_string());
    }
    for user in &results.users {
        lines.push(format!(
            "  {} <{}>",
            user.name.as_deref().unwrap_or("Unnamed"),
            user.email
        ));
    }
    lines.push(page_controls(state.has_previous_users(), state.has_next_users(), "users"));

    lines.push(format!("Posts (page {})", location.post_page));
    if results.posts.is_empty() {
        lines.push("  No posts found.".to_string());
    }
    for post in &results.posts {
        lines.push(format!("  {} [{}]", post.title, post.id));
    }
    lines.push(page_controls(state.has_previous_posts(), state.has_next_posts(), "posts"));
    lines.join("\n")
}

fn page_controls(previous: bool, next: bool, what: &str) -> String {
    let mut controls = Vec::new();
    if previous {
        controls.push(format!("prev-{}", what));
    }
    if next {
        controls.push(format!("next-{}", what));
    }
    format!("  -- {} --", controls.join(" | "))
}

pub fn render_me(state: &MeState) -> String {
    let mut lines = vec!["My Profile".to_string()];
    push_notice(&mut lines, state.notice.as_ref());

    let Some(profile) = &state.profile else {
        if state.loading {
            lines.push("Loading...".to_string());
        }
        return lines.join("\n");
    };

    lines.push(format!("Name: {}", state.display_name()));
    lines.push(format!("Email: {}", profile.email));
    if let Some(joined) = &profile.created_at {
        lines.push(format!(
            "Joined: {}",
            joined.with_timezone(&Local).format("%Y-%m-%d")
        ));
    }
    if state.editing {
        lines.push(format!("About (editing): {}", state.about_draft));
    } else if state.about().is_empty() {
        lines.push("About: No info provided.".to_string());
    } else {
        lines.push(format!("About: {}", state.about()));
    }
    lines.push(format!(
        "Sections: {}, {}, {}",
        MeSection::Posts,
        MeSection::Comments,
        MeSection::Likes
    ));
    lines.join("\n")
}

pub fn render_section(state: &SectionState, preview_chars: usize) -> String {
    let mut lines = vec![state.section.title().to_string()];
    push_notice(&mut lines, state.notice.as_ref());

    let Some(profile) = &state.profile else {
        if state.loading {
            lines.push("Loading...".to_string());
        }
        return lines.join("\n");
    };

    let before = lines.len();
    match state.section {
        MeSection::Posts => {
            for (index, post) in profile.posts.iter().enumerate() {
                lines.push(format!("{}. {} [{}]", index + 1, post.title, post.id));
                lines.push(format!("   {}", preview(&post.content, preview_chars)));
            }
        }
        MeSection::Comments => {
            for comment in &profile.comments {
                lines.push(format!(
                    "Comment on {}: {}",
                    state.title_of(comment.target_post_id()),
                    comment.content
                ));
            }
        }
        MeSection::Likes => {
            for like in &profile.likes {
                lines.push(format!(
                    "Liked Post: {} [{}]",
                    state.title_of(like.target_post_id()),
                    like.target_post_id().unwrap_or("?")
                ));
            }
        }
    }
    if lines.len() == before {
        lines.push("Nothing here yet.".to_string());
    }
    lines.join("\n")
}

pub fn render_user_page(state: &UserPageState, preview_chars: usize) -> String {
    let mut lines = vec![format!("Profile: {}", state.name)];
    push_notice(&mut lines, state.notice.as_ref());
    if state.loading {
        lines.push("Loading...".to_string());
        return lines.join("\n");
    }

    lines.push("Posts".to_string());
    if state.posts.is_empty() {
        lines.push("  No posts yet.".to_string());
    }
    for post in &state.posts {
        lines.push(format!("  {} [{}]", post.title, post.id));
        lines.push(format!("    {}", preview(&post.content, preview_chars)));
        lines.push(format!("    {}", timestamp(&post.created_at)));
    }

    lines.push("Comments".to_string());
    if state.comments.is_empty() {
        lines.push("  No comments yet.".to_string());
    }
    for comment in &state.comments {
        let on = comment
            .post
            .as_ref()
            .map(|p| p.title.as_str())
            .unwrap_or("a post");
        let when = comment
            .created_at
            .as_ref()
            .map(timestamp)
            .unwrap_or_default();
        lines.push(format!("  {}", comment.content));
        lines.push(format!("    On {} - {}", on, when));
    }

    lines.push("Likes".to_string());
    if state.likes.is_empty() {
        lines.push("  No likes yet.".to_string());
    }
    for like in &state.likes {
        let title = like
            .post
            .as_ref()
            .map(|p| p.title.as_str())
            .unwrap_or("a post");
        lines.push(format!("  {}", title));
    }
    lines.join("\n")
}

pub fn render_compose(state: &ComposeState) -> String {
    let mut lines = vec!["New Post".to_string()];
    push_notice(&mut lines, state.notice.as_ref());
    lines.push(format!("Title: {}", state.title));
    lines.push(format!("Content: {}", state.content));
    lines.join("\n")
}

pub fn render_discussions(state: &DiscussionsState, username: Option<&str>) -> String {
    let mut lines = vec![format!("Posts with Comments (page {})", state.page)];
    push_notice(&mut lines, state.notice.as_ref());

    if state.loading && state.discussions.is_empty() {
        lines.push("Loading...".to_string());
    } else if state.discussions.is_empty() {
        lines.push("No posts with comments available.".to_string());
    }

    for discussion in &state.discussions {
        lines.push(format!(
            "{}. {} [{}]",
            discussion.number, discussion.post.title, discussion.post.id
        ));
        for comment in &discussion.comments {
            push_comment(&mut lines, comment, username, "   ");
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Post, SearchResults};
    use crate::ui::post_list::{PostFilter, PostView};
    use crate::ui::search::SearchLocation;

    fn post(content: &str) -> Post {
        Post {
            id: "p1".into(),
            title: "Hello".into(),
            content: content.into(),
            created_at: Utc::now(),
            author: Author::named("ann"),
            like_count: 3,
        }
    }

    #[test]
    fn post_list_shows_number_preview_and_likes() {
        let state = PostListState {
            posts: vec![PostView {
                post: post(&"x".repeat(200)),
                liked_by_user: true,
                number: 11,
            }],
            page: 2,
            ..PostListState::new(10, PostFilter::All)
        };
        let text = render_post_list(&state, Some("ann"), 150);
        assert!(text.contains("11. Hello [p1]"));
        assert!(text.contains(&format!("{} more", "x".repeat(150))));
        assert!(!text.contains(&"x".repeat(151)));
        assert!(text.contains("♥ 3"));
        assert!(text.contains("(yours)"));
        assert!(text.contains("prev"));
    }

    #[test]
    fn search_hides_previous_on_first_page() {
        let state = SearchState {
            location: SearchLocation::new("rust"),
            results: Some(SearchResults::default()),
            loading: false,
        };
        let text = render_search(&state);
        assert!(!text.contains("prev-users"));
        assert!(text.contains("next-users"));
        assert!(text.contains("No users found."));
    }

    #[test]
    fn comments_without_ordinal_show_placeholder() {
        let state = CommentsState {
            post: Some(post("short")),
            ..CommentsState::new("p1")
        };
        let text = render_comments(&state, None, 150);
        assert!(text.starts_with("?. Hello"));
        assert!(text.contains("No comments yet."));
    }
}
