use crate::api::{ApiError, ForumClient};
use crate::session::SessionHandle;
use crate::ui::mvi::dispatch_mvi;
use crate::ui::notice::Notice;
use crate::ui::profile::intent::{MeIntent, SectionIntent, UserPageIntent};
use crate::ui::profile::reducer::{MeReducer, SectionReducer, UserPageReducer};
use crate::ui::profile::section::MeSection;
use crate::ui::profile::state::{MeState, SectionState, UserPageState};
use crate::ui::route::Route;
use crate::ui::Outcome;

/// Own profile with "about" editing.
pub struct MeView {
    client: ForumClient,
    session: SessionHandle,
    state: MeState,
}

impl MeView {
    pub fn new(client: ForumClient, session: SessionHandle) -> Self {
        Self {
            client,
            session,
            state: MeState::default(),
        }
    }

    pub fn state(&self) -> &MeState {
        &self.state
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.state.notice.take()
    }

    pub async fn load(&mut self) -> Outcome {
        if !self.session.is_signed_in() {
            return Outcome::Navigate(Route::LogIn);
        }
        dispatch_mvi!(self, state, MeReducer, MeIntent::FetchStarted);

        match self.client.me().await {
            Ok(profile) => {
                dispatch_mvi!(self, state, MeReducer, MeIntent::Loaded(profile));
                Outcome::Completed
            }
            Err(err) => {
                tracing::warn!("Failed to load own profile: {}", err);
                dispatch_mvi!(
                    self,
                    state,
                    MeReducer,
                    MeIntent::FetchFailed {
                        reason: err.to_string()
                    }
                );
                Outcome::Rejected
            }
        }
    }

    pub fn begin_edit(&mut self) {
        dispatch_mvi!(self, state, MeReducer, MeIntent::BeginEdit);
    }

    pub fn cancel_edit(&mut self) {
        dispatch_mvi!(self, state, MeReducer, MeIntent::CancelEdit);
    }

    pub fn set_about_draft(&mut self, about: impl Into<String>) {
        dispatch_mvi!(self, state, MeReducer, MeIntent::DraftChanged(about.into()));
    }

    pub async fn save_about(&mut self) -> Outcome {
        if !self.session.is_signed_in() {
            return Outcome::Navigate(Route::LogIn);
        }
        if self.state.profile.is_none() {
            self.notify(Notice::error("Error saving profile: Profile not loaded"));
            return Outcome::Rejected;
        }
        if self.state.about_draft.trim().is_empty() {
            self.notify(Notice::warning("About text cannot be empty"));
            return Outcome::Rejected;
        }

        let about = self.state.about_draft.clone();
        match self.client.update_about(&about).await {
            Ok(()) => {
                tracing::info!("About section saved");
                dispatch_mvi!(self, state, MeReducer, MeIntent::AboutSaved(about));
                Outcome::Completed
            }
            Err(ApiError::LoginRequired) => Outcome::Navigate(Route::LogIn),
            Err(err) => {
                tracing::warn!("Failed to save about section: {}", err);
                self.notify(Notice::error(format!("Error saving profile: {}", err)));
                Outcome::Rejected
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        dispatch_mvi!(self, state, MeReducer, MeIntent::Notify(notice));
    }
}

/// Own posts, comments, or likes.
pub struct SectionView {
    client: ForumClient,
    session: SessionHandle,
    state: SectionState,
}

impl SectionView {
    pub fn new(client: ForumClient, session: SessionHandle, section: MeSection) -> Self {
        Self {
            client,
            session,
            state: SectionState::new(section),
        }
    }

    pub fn state(&self) -> &SectionState {
        &self.state
    }

    pub async fn load(&mut self) -> Outcome {
        if !self.session.is_signed_in() {
            return Outcome::Navigate(Route::LogIn);
        }
        dispatch_mvi!(self, state, SectionReducer, SectionIntent::FetchStarted);

        let result = tokio::try_join!(self.client.me(), self.client.all_posts());
        match result {
            Ok((profile, posts)) => {
                dispatch_mvi!(
                    self,
                    state,
                    SectionReducer,
                    SectionIntent::Loaded { profile, posts }
                );
                Outcome::Completed
            }
            Err(err) => {
                tracing::warn!(section = %self.state.section, "Failed to load section: {}", err);
                dispatch_mvi!(self, state, SectionReducer, SectionIntent::FetchFailed);
                Outcome::Rejected
            }
        }
    }
}

/// Public profile of another user.
pub struct UserPage {
    client: ForumClient,
    state: UserPageState,
}

impl UserPage {
    pub fn new(client: ForumClient, name: impl Into<String>) -> Self {
        Self {
            client,
            state: UserPageState {
                name: name.into(),
                ..UserPageState::default()
            },
        }
    }

    pub fn state(&self) -> &UserPageState {
        &self.state
    }

    pub async fn load(&mut self) {
        dispatch_mvi!(self, state, UserPageReducer, UserPageIntent::FetchStarted);

        let client = &self.client;
        let name = self.state.name.as_str();
        let result = tokio::try_join!(
            client.posts_by(name),
            client.comments_by(name),
            client.likes_by(name),
        );

        match result {
            Ok((posts, comments, likes)) => {
                dispatch_mvi!(
                    self,
                    state,
                    UserPageReducer,
                    UserPageIntent::Loaded {
                        posts,
                        comments,
                        likes
                    }
                );
            }
            Err(err) => {
                tracing::warn!(user = %self.state.name, "Failed to load profile: {}", err);
                dispatch_mvi!(
                    self,
                    state,
                    UserPageReducer,
                    UserPageIntent::FetchFailed {
                        reason: err.to_string()
                    }
                );
            }
        }
    }
}
