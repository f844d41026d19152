use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use strsim::damerau_levenshtein;

const MAX_EDIT_DISTANCE: usize = 2;

/// Best "did you mean" candidate for a mistyped command name.
///
/// Abbreviations ("open" for "open-path") are caught by the fuzzy matcher,
/// transpositions and small typos ("veiw") by Damerau-Levenshtein distance.
pub fn closest_match<'a>(input: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let candidates: Vec<&str> = candidates.collect();
    let matcher = SkimMatcherV2::default();

    let fuzzy = candidates
        .iter()
        .filter_map(|cmd| matcher.fuzzy_match(cmd, input).map(|score| (score, *cmd)))
        .max_by_key(|(score, _)| *score)
        .map(|(_, cmd)| cmd);
    if fuzzy.is_some() {
        return fuzzy;
    }

    candidates
        .iter()
        .map(|cmd| (damerau_levenshtein(input, cmd), *cmd))
        .filter(|(distance, _)| *distance <= MAX_EDIT_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, cmd)| cmd)
}
