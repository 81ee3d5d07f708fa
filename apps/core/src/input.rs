/// Raw palette input, interpreted. `keyword>rest` becomes a keyword
/// prefixed sub-search; anything else is a free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub is_command: bool,
    pub keyword: String,
    pub query: String,
}

impl InputState {
    pub fn free_text(&self) -> &str {
        self.query.trim()
    }

    pub fn has_query(&self) -> bool {
        !self.free_text().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    pub is_match: bool,
    pub is_typing: bool,
    pub query: String,
}

/// Grammar: `^([a-zA-Z]+)>(.*)`. The keyword is lowercased; the query is
/// the exact remainder. Non-matching input is returned verbatim as the
/// query.
pub fn parse(raw: &str) -> InputState {
    if let Some(split) = raw.find('>') {
        let (head, tail) = raw.split_at(split);
        if !head.is_empty() && head.chars().all(|c| c.is_ascii_alphabetic()) {
            return InputState {
                is_command: true,
                keyword: head.to_ascii_lowercase(),
                query: tail[1..].to_string(),
            };
        }
    }

    InputState {
        is_command: false,
        keyword: String::new(),
        query: raw.to_string(),
    }
}

/// Exact keyword equality only; `is_typing` flags any prefixed input so
/// producers can suppress static suggestions mid-keyword.
pub fn match_keyword(keyword: &str, state: &InputState) -> KeywordMatch {
    KeywordMatch {
        is_match: state.is_command && state.keyword == keyword.to_ascii_lowercase(),
        is_typing: state.is_command,
        query: state.query.clone(),
    }
}
