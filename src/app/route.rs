//! Screens addressed by path, mirroring `/` and `/user/{id}`.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    List,
    Detail { id: String },
    NotFound { path: String },
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Route::List,
            ["user", id] => Route::Detail { id: id.to_string() },
            _ => Route::NotFound {
                path: trimmed.to_string(),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail { id } => format!("/user/{id}"),
            Route::NotFound { path } => path.clone(),
        }
    }
}
