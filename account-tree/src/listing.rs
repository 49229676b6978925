use serde::{Deserialize, Serialize};

/// Envelope every listing endpoint of the API answers with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: ListMeta,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListMeta {
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl ListMeta {
    pub fn has_more(&self) -> bool {
        self.current_page < self.last_page
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: SortDirection,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 15,
            search: None,
            sort_by: None,
            sort_direction: SortDirection::Asc,
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(column.into());
        self.sort_direction = direction;
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut params = url::form_urlencoded::Serializer::new(String::new());
        params.append_pair("page", &self.page.to_string());
        params.append_pair("per_page", &self.per_page.to_string());
        if let Some(term) = &self.search {
            params.append_pair("search", term);
        }
        if let Some(column) = &self.sort_by {
            params.append_pair("sort_by", column);
            params.append_pair("sort_direction", self.sort_direction.as_str());
        }
        params.finish()
    }
}
