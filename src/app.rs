//! Command dispatch and the interactive shell.
//!
//! One-shot subcommands and shell lines both end up as a [`Route`] to open
//! or an action on the active [`Screen`]. Output is the rendered screen.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{ApiError, ForumClient};
use crate::config::Config;
use crate::render;
use crate::session::SessionProvider;
use crate::ui::compose::ComposeView;
use crate::ui::discussions::DiscussionsView;
use crate::ui::post_detail::{CommentsView, PostPage};
use crate::ui::post_list::{PostFilter, PostListView};
use crate::ui::profile::{MeSection, MeView, SectionView, UserPage};
use crate::ui::search::{Debouncer, SearchLocation, SearchView};
use crate::ui::{Notice, Outcome, Route};

/// One-shot commands. Each opens a screen, optionally acts on it, and
/// prints the result.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Recent posts
    Posts {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Posts created today
    Today {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Posts created before today
    Past {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Posts that have comments, with their comments
    Discussions {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one post
    Post { id: String },
    /// Show a post with its comments
    Comments { id: String },
    /// Comment on a post
    Comment {
        post_id: String,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Delete one of your comments
    DeleteComment { post_id: String, comment_id: String },
    /// Like or unlike a post on the given page of recent posts
    Like {
        post_id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Delete one of your posts on the given page of recent posts
    DeletePost {
        post_id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search users and posts
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        user_page: u32,
        #[arg(long, default_value_t = 1)]
        post_page: u32,
    },
    /// Create a post
    Create { title: String, content: String },
    /// Your profile
    Me,
    /// Your posts, comments, or likes
    Section { section: MeSection },
    /// Replace the "about" text of your profile
    About {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Someone's public profile
    User { name: String },
    /// Create an account
    SignUp {
        name: String,
        email: String,
        password: String,
    },
    /// Show who is signed in
    Whoami,
    /// Open any screen by its path, e.g. /posts/42/comments
    Open { path: String },
    /// Interactive shell
    Shell,
}

/// Commands accepted by the interactive shell, one per line.
#[derive(Debug, Parser)]
#[command(multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    /// Open a screen by path
    Open { path: String },
    /// Next page
    Next,
    /// Previous page
    Prev,
    /// Next page of user results
    NextUsers,
    /// Previous page of user results
    PrevUsers,
    /// Next page of post results
    NextPosts,
    /// Previous page of post results
    PrevPosts,
    /// Type a search query (debounced)
    Type {
        #[arg(num_args = 0.., trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// Back in search history
    Back,
    /// Forward in search history
    Forward,
    /// Like or unlike a post
    Like { post_id: String },
    /// Delete a post or comment on this screen
    Delete { id: String },
    /// Set the comment draft and submit it
    Comment {
        #[arg(num_args = 0.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Start editing the about text
    Edit,
    /// Set the about draft
    About {
        #[arg(num_args = 0.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Save the about draft
    Save,
    /// Set the new post title
    Title {
        #[arg(num_args = 0.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Set the new post content
    Body {
        #[arg(num_args = 0.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Submit the new post
    Submit,
    /// Sign in
    Login { email: String, password: String },
    /// Create an account and sign in
    Signup {
        name: String,
        email: String,
        password: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
    /// Render the current screen again
    Show,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// The active screen and its view.
pub enum Screen {
    PostList(PostListView),
    Discussions(DiscussionsView),
    Post(PostPage),
    Comments(CommentsView),
    Search(SearchView),
    Compose(ComposeView),
    Me(MeView),
    Section(SectionView),
    User(UserPage),
    /// Log-in or sign-up prompt.
    Auth(Route),
}

pub struct App {
    config: Config,
    client: ForumClient,
    sessions: SessionProvider,
    screen: Option<Screen>,
    /// Notice of the previous screen after a navigation.
    carried: Option<Notice>,
}

impl App {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = ForumClient::new(&config)?;
        let sessions = SessionProvider::new(client.clone());
        Ok(Self {
            config,
            client,
            sessions,
            screen: None,
            carried: None,
        })
    }

    pub fn sessions(&self) -> &SessionProvider {
        &self.sessions
    }

    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    /// Open `route` as the active screen and load it.
    pub async fn open(&mut self, route: Route) -> Outcome {
        tracing::debug!(route = %route, "Opening screen");
        let client = self.client.clone();
        let session = self.sessions.handle();
        let defaults = &self.config.defaults;

        let (screen, outcome) = match route {
            Route::Home => self.post_list(PostFilter::All, 1).await,
            Route::Today => self.post_list(PostFilter::Today, 1).await,
            Route::Past => self.post_list(PostFilter::Past, 1).await,
            Route::Discussions => {
                let mut view = DiscussionsView::new(client, session, defaults.posts_per_page);
                view.load().await;
                (Screen::Discussions(view), Outcome::Completed)
            }
            Route::Post(id) => {
                let mut view = PostPage::new(client, id);
                view.load().await;
                (Screen::Post(view), Outcome::Completed)
            }
            Route::Comments(id) => {
                let mut view = CommentsView::new(client, session, id);
                view.open().await;
                (Screen::Comments(view), Outcome::Completed)
            }
            Route::Search(location) => {
                let mut view = SearchView::new(client, defaults.search_page_size, location);
                view.refresh().await;
                (Screen::Search(view), Outcome::Completed)
            }
            Route::CreatePost => (
                Screen::Compose(ComposeView::new(client, session)),
                Outcome::Completed,
            ),
            Route::Me => {
                let mut view = MeView::new(client, session);
                let outcome = view.load().await;
                (Screen::Me(view), outcome)
            }
            Route::MeSection(section) => {
                let mut view = SectionView::new(client, session, section);
                let outcome = view.load().await;
                (Screen::Section(view), outcome)
            }
            Route::User(name) => {
                let mut view = UserPage::new(client, name);
                view.load().await;
                (Screen::User(view), Outcome::Completed)
            }
            route @ (Route::LogIn | Route::SignUp) => (Screen::Auth(route), Outcome::Completed),
        };

        if let Outcome::Navigate(next) = &outcome {
            self.screen = Some(Screen::Auth(next.clone()));
        } else {
            self.screen = Some(screen);
        }
        outcome
    }

    async fn post_list(&self, filter: PostFilter, page: u32) -> (Screen, Outcome) {
        let mut view = PostListView::new(
            self.client.clone(),
            self.sessions.handle(),
            self.config.defaults.posts_per_page,
            filter,
        )
        .at_page(page);
        view.load().await;
        (Screen::PostList(view), Outcome::Completed)
    }

    /// Follow a navigation request from an action. The notice of the screen
    /// being left is shown on top of the next one.
    async fn follow(&mut self, outcome: Outcome) -> Outcome {
        match outcome {
            Outcome::Navigate(route) => {
                self.carried = self.take_notice();
                self.open(route.clone()).await;
                Outcome::Navigate(route)
            }
            other => other,
        }
    }

    fn take_notice(&mut self) -> Option<Notice> {
        match self.screen.as_mut()? {
            Screen::PostList(view) => view.take_notice(),
            Screen::Discussions(view) => view.take_notice(),
            Screen::Comments(view) => view.take_notice(),
            Screen::Compose(view) => view.take_notice(),
            Screen::Me(view) => view.take_notice(),
            _ => None,
        }
    }

    /// Render the active screen.
    pub fn render(&self) -> String {
        let username = self.sessions.handle().username();
        let username = username.as_deref();
        let preview_chars = self.config.defaults.preview_chars;

        match &self.screen {
            None => String::new(),
            Some(Screen::PostList(view)) => {
                render::render_post_list(view.state(), username, preview_chars)
            }
            Some(Screen::Discussions(view)) => render::render_discussions(view.state(), username),
            Some(Screen::Post(view)) => render::render_post_page(view.state()),
            Some(Screen::Comments(view)) => {
                render::render_comments(view.state(), username, preview_chars)
            }
            Some(Screen::Search(view)) => render::render_search(view.state()),
            Some(Screen::Compose(view)) => render::render_compose(view.state()),
            Some(Screen::Me(view)) => render::render_me(view.state()),
            Some(Screen::Section(view)) => render::render_section(view.state(), preview_chars),
            Some(Screen::User(view)) => render::render_user_page(view.state(), preview_chars),
            Some(Screen::Auth(Route::SignUp)) => {
                "Sign up: signup <name> <email> <password>".to_string()
            }
            Some(Screen::Auth(_)) => {
                format!("{}. Log in: login <email> <password>", ApiError::LoginRequired)
            }
        }
    }

    /// Render, then drop one-shot notices so they are shown once.
    fn render_once(&mut self) -> String {
        let text = self.render();
        self.take_notice();
        match self.carried.take() {
            Some(notice) => format!("{}\n{}", notice, text),
            None => text,
        }
    }

    /// Run a one-shot command and return what to print.
    pub async fn run(&mut self, command: Command) -> anyhow::Result<String> {
        match command {
            Command::Posts { page } => {
                self.open_list(PostFilter::All, page).await;
            }
            Command::Today { page } => {
                self.open_list(PostFilter::Today, page).await;
            }
            Command::Past { page } => {
                self.open_list(PostFilter::Past, page).await;
            }
            Command::Discussions { page } => {
                let mut view = DiscussionsView::new(
                    self.client.clone(),
                    self.sessions.handle(),
                    self.config.defaults.posts_per_page,
                )
                .at_page(page);
                view.load().await;
                self.screen = Some(Screen::Discussions(view));
            }
            Command::Post { id } => {
                self.open(Route::Post(id)).await;
            }
            Command::Comments { id } => {
                self.open(Route::Comments(id)).await;
            }
            Command::Comment { post_id, text } => {
                self.open(Route::Comments(post_id)).await;
                let outcome = match self.screen.as_mut() {
                    Some(Screen::Comments(view)) => {
                        view.set_draft(text.join(" "));
                        view.submit_comment().await
                    }
                    _ => Outcome::Rejected,
                };
                self.follow(outcome).await;
            }
            Command::DeleteComment {
                post_id,
                comment_id,
            } => {
                self.open(Route::Comments(post_id)).await;
                let outcome = match self.screen.as_mut() {
                    Some(Screen::Comments(view)) => view.delete_comment(&comment_id).await,
                    _ => Outcome::Rejected,
                };
                self.follow(outcome).await;
            }
            Command::Like { post_id, page } => {
                self.open_list(PostFilter::All, page).await;
                let outcome = match self.screen.as_mut() {
                    Some(Screen::PostList(view)) => view.toggle_like(&post_id).await,
                    _ => Outcome::Rejected,
                };
                self.follow(outcome).await;
            }
            Command::DeletePost { post_id, page } => {
                self.open_list(PostFilter::All, page).await;
                let outcome = match self.screen.as_mut() {
                    Some(Screen::PostList(view)) => view.delete_post(&post_id).await,
                    _ => Outcome::Rejected,
                };
                self.follow(outcome).await;
            }
            Command::Search {
                query,
                user_page,
                post_page,
            } => {
                let location = SearchLocation {
                    query,
                    user_page: user_page.max(1),
                    post_page: post_page.max(1),
                };
                self.open(Route::Search(location)).await;
            }
            Command::Create { title, content } => {
                self.open(Route::CreatePost).await;
                let outcome = match self.screen.as_mut() {
                    Some(Screen::Compose(view)) => {
                        view.set_title(title);
                        view.set_content(content);
                        view.submit().await
                    }
                    _ => Outcome::Rejected,
                };
                self.follow(outcome).await;
            }
            Command::Me => {
                self.open(Route::Me).await;
            }
            Command::Section { section } => {
                self.open(Route::MeSection(section)).await;
            }
            Command::About { text } => {
                if self.open(Route::Me).await.is_completed() {
                    let outcome = match self.screen.as_mut() {
                        Some(Screen::Me(view)) => {
                            view.begin_edit();
                            view.set_about_draft(text.join(" "));
                            view.save_about().await
                        }
                        _ => Outcome::Rejected,
                    };
                    self.follow(outcome).await;
                }
            }
            Command::User { name } => {
                self.open(Route::User(name)).await;
            }
            Command::SignUp {
                name,
                email,
                password,
            } => {
                let session = self.sessions.sign_up(&name, &email, &password).await?;
                return Ok(format!("Signed up as {}", session.user.name));
            }
            Command::Whoami => return Ok(self.whoami()),
            Command::Open { path } => {
                let route = Route::parse(&path)
                    .ok_or_else(|| anyhow::anyhow!("Unknown path: {}", path))?;
                self.open(route).await;
            }
            Command::Shell => {
                self.shell().await?;
                return Ok(String::new());
            }
        }
        Ok(self.render_once())
    }

    async fn open_list(&mut self, filter: PostFilter, page: u32) {
        let (screen, _) = self.post_list(filter, page).await;
        self.screen = Some(screen);
    }

    fn whoami(&self) -> String {
        match self.sessions.current() {
            Some(session) => format!("{} <{}>", session.user.name, session.user.email),
            None => "Not signed in".to_string(),
        }
    }

    /// Interactive loop: one command per line, search input debounced.
    pub async fn shell(&mut self) -> anyhow::Result<()> {
        let delay = Duration::from_millis(self.config.defaults.search_debounce_ms);
        let (mut debouncer, mut queries) = Debouncer::<String>::new(delay);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.open(Route::Home).await;
        println!("{}", self.render_once());

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match self.shell_line(line, &mut debouncer).await {
                        Ok(ShellStep::Continue(text)) => {
                            if !text.is_empty() {
                                println!("{}", text);
                            }
                        }
                        Ok(ShellStep::Quit) => break,
                        Err(message) => println!("{}", message),
                    }
                }
                Some(query) = queries.recv() => {
                    self.search_for(query).await;
                    println!("{}", self.render_once());
                }
            }
        }
        debouncer.cancel();
        Ok(())
    }

    async fn search_for(&mut self, query: String) {
        match self.screen.as_mut() {
            Some(Screen::Search(view)) => view.set_query(&query).await,
            _ => {
                self.open(Route::Search(SearchLocation::new(query))).await;
            }
        }
    }

    async fn shell_line(
        &mut self,
        line: &str,
        debouncer: &mut Debouncer<String>,
    ) -> Result<ShellStep, String> {
        let words = split_words(line)?;
        let parsed = ShellLine::try_parse_from(words).map_err(|e| e.to_string())?;

        let outcome = match parsed.command {
            ShellCommand::Quit => return Ok(ShellStep::Quit),
            ShellCommand::Whoami => return Ok(ShellStep::Continue(self.whoami())),
            ShellCommand::Show => Outcome::Completed,
            ShellCommand::Open { path } => {
                let route = Route::parse(&path).ok_or_else(|| format!("Unknown path: {}", path))?;
                self.open(route).await
            }
            ShellCommand::Type { query } => {
                debouncer.push(query.join(" "));
                return Ok(ShellStep::Continue(String::new()));
            }
            ShellCommand::Login { email, password } => {
                let session = self
                    .sessions
                    .sign_in(&email, &password)
                    .await
                    .map_err(|e| e.to_string())?;
                println!("Signed in as {}", session.user.name);
                if matches!(self.screen, Some(Screen::Auth(_)) | None) {
                    self.open(Route::Home).await
                } else {
                    Outcome::Completed
                }
            }
            ShellCommand::Signup {
                name,
                email,
                password,
            } => {
                let session = self
                    .sessions
                    .sign_up(&name, &email, &password)
                    .await
                    .map_err(|e| e.to_string())?;
                println!("Signed up as {}", session.user.name);
                self.open(Route::Home).await
            }
            ShellCommand::Logout => {
                if let Err(err) = self.sessions.sign_out().await {
                    println!("Sign-out request failed: {}", err);
                }
                self.open(Route::Home).await
            }
            command => {
                let outcome = self.screen_action(command).await?;
                self.follow(outcome).await
            }
        };
        tracing::debug!(?outcome, "Shell command handled");
        Ok(ShellStep::Continue(self.render_once()))
    }

    /// Actions that depend on the active screen.
    async fn screen_action(&mut self, command: ShellCommand) -> Result<Outcome, String> {
        let Some(screen) = self.screen.as_mut() else {
            return Err("No screen open".to_string());
        };

        let outcome = match (screen, command) {
            (Screen::PostList(view), ShellCommand::Next) => {
                view.next_page().await;
                Outcome::Completed
            }
            (Screen::PostList(view), ShellCommand::Prev) => {
                view.previous_page().await;
                Outcome::Completed
            }
            (Screen::PostList(view), ShellCommand::Like { post_id }) => {
                view.toggle_like(&post_id).await
            }
            (Screen::PostList(view), ShellCommand::Delete { id }) => view.delete_post(&id).await,
            (Screen::Discussions(view), ShellCommand::Next) => {
                view.next_page().await;
                Outcome::Completed
            }
            (Screen::Discussions(view), ShellCommand::Prev) => {
                view.previous_page().await;
                Outcome::Completed
            }
            (Screen::Discussions(view), ShellCommand::Delete { id }) => {
                view.delete_comment(&id).await
            }
            (Screen::Comments(view), ShellCommand::Comment { text }) => {
                view.set_draft(text.join(" "));
                view.submit_comment().await
            }
            (Screen::Comments(view), ShellCommand::Delete { id }) => view.delete_comment(&id).await,
            (Screen::Search(view), ShellCommand::NextUsers) => {
                view.next_users().await;
                Outcome::Completed
            }
            (Screen::Search(view), ShellCommand::PrevUsers) => {
                view.previous_users().await;
                Outcome::Completed
            }
            (Screen::Search(view), ShellCommand::NextPosts) => {
                view.next_posts().await;
                Outcome::Completed
            }
            (Screen::Search(view), ShellCommand::PrevPosts) => {
                view.previous_posts().await;
                Outcome::Completed
            }
            (Screen::Search(view), ShellCommand::Back) => {
                if !view.back().await {
                    return Err("Nothing to go back to".to_string());
                }
                Outcome::Completed
            }
            (Screen::Search(view), ShellCommand::Forward) => {
                if !view.forward().await {
                    return Err("Nothing to go forward to".to_string());
                }
                Outcome::Completed
            }
            (Screen::Me(view), ShellCommand::Edit) => {
                view.begin_edit();
                Outcome::Completed
            }
            (Screen::Me(view), ShellCommand::About { text }) => {
                view.set_about_draft(text.join(" "));
                Outcome::Completed
            }
            (Screen::Me(view), ShellCommand::Save) => view.save_about().await,
            (Screen::Compose(view), ShellCommand::Title { text }) => {
                view.set_title(text.join(" "));
                Outcome::Completed
            }
            (Screen::Compose(view), ShellCommand::Body { text }) => {
                view.set_content(text.join(" "));
                Outcome::Completed
            }
            (Screen::Compose(view), ShellCommand::Submit) => view.submit().await,
            (_, command) => return Err(format!("Not available on this screen: {:?}", command)),
        };
        Ok(outcome)
    }
}

enum ShellStep {
    Continue(String),
    Quit,
}

/// Split a shell line into words, honouring single and double quotes.
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            // Quotes only group at the start of a word: `don't` stays literal.
            (None, '"' | '\'') if !in_word => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quote.is_some() {
        return Err("Unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_words_handles_quotes() {
        assert_eq!(
            split_words(r#"login ann@example.com "pass word""#).unwrap(),
            vec!["login", "ann@example.com", "pass word"]
        );
        assert_eq!(split_words("  next  ").unwrap(), vec!["next"]);
        assert_eq!(split_words("title ''").unwrap(), vec!["title", ""]);
        assert!(split_words("comment \"oops").is_err());
    }

    #[test]
    fn split_words_keeps_apostrophes_inside_words() {
        assert_eq!(
            split_words("comment I don't agree").unwrap(),
            vec!["comment", "I", "don't", "agree"]
        );
        assert_eq!(split_words("type don't").unwrap(), vec!["type", "don't"]);
        assert_eq!(
            split_words(r#"about "it's fine" ok"#).unwrap(),
            vec!["about", "it's fine", "ok"]
        );
    }

    #[test]
    fn shell_lines_parse_to_commands() {
        let parsed = ShellLine::try_parse_from(["like", "p1"]).unwrap();
        assert!(matches!(parsed.command, ShellCommand::Like { post_id } if post_id == "p1"));

        let parsed = ShellLine::try_parse_from(["comment", "nice", "post"]).unwrap();
        match parsed.command {
            ShellCommand::Comment { text } => assert_eq!(text.join(" "), "nice post"),
            other => panic!("Expected comment, got {:?}", other),
        }

        let parsed = ShellLine::try_parse_from(["next-users"]).unwrap();
        assert!(matches!(parsed.command, ShellCommand::NextUsers));

        assert!(ShellLine::try_parse_from(["exit"]).is_ok());
        assert!(ShellLine::try_parse_from(["bogus"]).is_err());
    }
}
