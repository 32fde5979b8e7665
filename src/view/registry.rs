//! Known views and lookup by component key.

use std::collections::HashMap;

use crate::view::loader::{ComponentLoader, View};

/// Views shipped with the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppView {
    /// Layout shell hosting the `/main` child pages.
    MainLayout,
    Index,
    MovieList,
    Login,
    NotFound,
}

impl AppView {
    pub const ALL: [AppView; 5] = [
        AppView::MainLayout,
        AppView::Index,
        AppView::MovieList,
        AppView::Login,
        AppView::NotFound,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AppView::MainLayout => "layouts/MainLayout",
            AppView::Index => "pages/IndexPage",
            AppView::MovieList => "components/Movie/MovieList",
            AppView::Login => "components/Login/LoginForm",
            AppView::NotFound => "pages/ErrorNotFound",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AppView::MainLayout => "Main Layout",
            AppView::Index => "Home",
            AppView::MovieList => "Movies",
            AppView::Login => "Login",
            AppView::NotFound => "Not Found",
        }
    }

    pub fn view(self) -> View {
        View::new(self.key(), self.title())
    }

    /// Fresh lazy loader for this view.
    pub fn loader(self) -> ComponentLoader {
        ComponentLoader::new(self.key(), move || async move { Ok(self.view()) })
    }
}

/// Component loaders indexed by key.
///
/// Config-supplied route tables name their components by key; the registry
/// turns those keys into loaders.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    loaders: HashMap<String, ComponentLoader>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry containing every [`AppView`].
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for view in AppView::ALL {
            registry.register(view.loader());
        }
        registry
    }

    /// Register a loader under its own key, replacing any previous entry.
    pub fn register(&mut self, loader: ComponentLoader) -> Option<ComponentLoader> {
        self.loaders.insert(loader.key().to_string(), loader)
    }

    pub fn get(&self, key: &str) -> Option<ComponentLoader> {
        self.loaders.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.loaders.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}
