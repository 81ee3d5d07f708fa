use crate::model::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Subtitle,
    Url,
}

/// A scored match against one command. `positions` are char indices into
/// the matched field's original text, for highlighting.
#[derive(Debug, Clone)]
pub struct RankedMatch {
    pub index: usize,
    pub field: MatchField,
    pub score: i64,
    pub positions: Vec<usize>,
}

impl RankedMatch {
    /// Folds matched char indices into contiguous `(start, len)` spans.
    pub fn spans(&self) -> Vec<(usize, usize)> {
        let mut spans: Vec<(usize, usize)> = Vec::new();
        for &position in &self.positions {
            match spans.last_mut() {
                Some((start, len)) if *start + *len == position => *len += 1,
                _ => spans.push((position, 1)),
            }
        }
        spans
    }
}

// Lower-ranked fields need a clear lead before they beat a title match.
const SUBTITLE_PENALTY: i64 = 100;
const URL_PENALTY: i64 = 200;

// One searchable field, case-folded once with a char-occurrence mask so
// most non-matching fields are rejected with a single AND.
struct FoldedField {
    chars: Vec<char>,
    mask: u32,
}

impl FoldedField {
    fn new(text: &str) -> Self {
        let chars = fold_chars(text);
        let mask = char_mask(&chars);
        Self { chars, mask }
    }
}

struct CorpusEntry {
    title: FoldedField,
    subtitle: Option<FoldedField>,
    url: Option<FoldedField>,
}

/// Search corpus with folding done up front, once per command rather
/// than once per query, so repeated queries over one catalog stay cheap.
pub struct SearchCorpus {
    entries: Vec<CorpusEntry>,
}

impl SearchCorpus {
    pub fn new(commands: &[Command]) -> Self {
        let entries = commands
            .iter()
            .map(|command| CorpusEntry {
                title: FoldedField::new(&command.title),
                subtitle: command.subtitle.as_deref().map(FoldedField::new),
                url: command.url.as_deref().map(FoldedField::new),
            })
            .collect();
        Self { entries }
    }

    /// Fuzzy-matches `query` against title, subtitle and url of every
    /// command, keeping the best-scoring field per command. Any
    /// subsequence hit counts as a match; results are sorted by score,
    /// ties keep corpus order, and the list is capped at `limit`.
    pub fn search(&self, query: &str, limit: usize) -> Vec<RankedMatch> {
        if limit == 0 || self.entries.is_empty() || query.trim().is_empty() {
            return Vec::new();
        }

        let needle = fold_chars(query.trim());
        let needle_mask = char_mask(&needle);
        let mut matches: Vec<RankedMatch> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| best_field_match(index, entry, &needle, needle_mask))
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
        matches.truncate(limit);
        matches
    }
}

/// One-shot convenience over [`SearchCorpus`].
pub fn search(query: &str, corpus: &[Command], limit: usize) -> Vec<RankedMatch> {
    SearchCorpus::new(corpus).search(query, limit)
}

fn best_field_match(
    index: usize,
    entry: &CorpusEntry,
    needle: &[char],
    needle_mask: u32,
) -> Option<RankedMatch> {
    let mut best: Option<RankedMatch> = None;

    let fields = [
        (MatchField::Title, Some(&entry.title), 0),
        (MatchField::Subtitle, entry.subtitle.as_ref(), SUBTITLE_PENALTY),
        (MatchField::Url, entry.url.as_ref(), URL_PENALTY),
    ];

    for (field, folded, penalty) in fields {
        let Some(folded) = folded else { continue };
        // A field missing any needle char cannot match either way.
        if needle_mask & folded.mask != needle_mask {
            continue;
        }
        let Some((raw_score, positions)) = score_field(&folded.chars, needle) else {
            continue;
        };
        let score = raw_score - penalty;
        if best.as_ref().map(|b| score > b.score).unwrap_or(true) {
            best = Some(RankedMatch {
                index,
                field,
                score,
                positions,
            });
        }
    }

    best
}

fn score_field(haystack: &[char], needle: &[char]) -> Option<(i64, Vec<usize>)> {
    if haystack.is_empty() || needle.is_empty() {
        return None;
    }

    if let Some(position) = find_substring(haystack, needle) {
        let prefix_bonus = if position == 0 { 400 } else { 0 };
        let compact_bonus = (needle.len() as i64) * 40;
        let position_penalty = position as i64;
        let length_penalty = (haystack.len() as i64 - needle.len() as i64).abs();
        let score = 10_000 + prefix_bonus + compact_bonus - position_penalty - length_penalty;
        return Some((score, (position..position + needle.len()).collect()));
    }

    let positions = subsequence_positions(haystack, needle)?;
    let start_penalty = positions[0] as i64;
    let gap_penalty: i64 = positions
        .windows(2)
        .map(|pair| (pair[1] - pair[0] - 1) as i64)
        .sum();
    let length_penalty = (haystack.len() as i64 - needle.len() as i64).max(0);
    let score = 5_000 + (needle.len() as i64) * 30 - gap_penalty * 6 - start_penalty - length_penalty;

    Some((score, positions))
}

// Case-folded chars, one per input char so positions stay aligned with
// the original text.
fn fold_chars(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

// Whitespace is left out: subsequence matching skips it, so it must not
// be a required char.
fn char_mask(chars: &[char]) -> u32 {
    chars
        .iter()
        .filter(|c| !c.is_whitespace())
        .fold(0u32, |mask, c| mask | 1 << ((*c as u32) % 32))
}

fn find_substring(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&start| haystack[start..start + needle.len()] == *needle)
}

/// Greedy left-to-right subsequence match, whitespace in the needle is
/// skipped so "q4 report" can land inside "Q4_Report".
fn subsequence_positions(haystack: &[char], needle: &[char]) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(needle.len());
    let mut next_start = 0;

    for &needle_char in needle {
        if needle_char.is_whitespace() {
            continue;
        }
        let found = haystack[next_start..]
            .iter()
            .position(|&hay_char| hay_char == needle_char)?;
        let absolute = next_start + found;
        positions.push(absolute);
        next_start = absolute + 1;
    }

    if positions.is_empty() {
        return None;
    }
    Some(positions)
}

#[cfg(test)]
mod tests {
    use super::{search, MatchField, SearchCorpus};
    use crate::model::Command;

    fn corpus() -> Vec<Command> {
        vec![
            Command::new("New Tab").subtitle("Open a new tab"),
            Command::new("Close Tab").subtitle("Close the current tab"),
            Command::new("GitHub").url("https://github.com/"),
        ]
    }

    #[test]
    fn prefix_match_outranks_inner_match() {
        let results = search("new", &corpus(), 10);
        assert_eq!(results[0].index, 0);
        assert_eq!(results[0].field, MatchField::Title);
    }

    #[test]
    fn url_field_matches_when_title_does_not() {
        let results = search("github.com", &corpus(), 10);
        assert_eq!(results[0].index, 2);
        assert_eq!(results[0].field, MatchField::Url);
    }

    #[test]
    fn spans_fold_adjacent_positions() {
        let results = search("tab", &corpus(), 10);
        let spans = results[0].spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].1, 3);
    }

    #[test]
    fn reused_corpus_matches_the_one_shot_path() {
        let commands = corpus();
        let reusable = SearchCorpus::new(&commands);
        for query in ["new", "close", "github.com", "tab"] {
            let cached = reusable.search(query, 10);
            let fresh = search(query, &commands, 10);
            assert_eq!(cached.len(), fresh.len());
            for (a, b) in cached.iter().zip(fresh.iter()) {
                assert_eq!(a.index, b.index);
                assert_eq!(a.score, b.score);
                assert_eq!(a.positions, b.positions);
            }
        }
    }
}
