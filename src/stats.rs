//! stats.rs
//!
//! Pure reductions from fetched API data to render parameters. The three
//! subsets are deliberately independent:
//!   • total stars sum over the whole repository listing,
//!   • the language tally covers only the first 12 repositories,
//!   • the signal bars cover only the first 16.
//! Denominators floor at 1 so empty or all-zero inputs degrade to empty
//! lists and minimum-height bars instead of dividing by zero.

use std::collections::HashMap;

use crate::github::Repo;

/// Repositories whose language breakdowns feed the tally.
pub const LANGUAGE_REPO_LIMIT: usize = 12;
/// Repositories whose star counts feed the signal bars.
pub const SIGNAL_BAR_LIMIT: usize = 16;
/// Rows shown in the language legend.
pub const TOP_LANGUAGES: usize = 5;

const BAR_MIN_HEIGHT: u32 = 6;
const BAR_SPAN: f64 = 28.0;

/// Everything the renderer needs for one artifact.
pub struct HudStats {
    pub handle: String,
    pub followers: u64,
    pub public_repos: u64,
    pub total_stars: u64,
    pub languages: Vec<LanguageShare>,
    pub signal_bars: Vec<u32>,
}

/// One ranked legend row. `share` is in [0, 1].
pub struct LanguageShare {
    pub name: String,
    pub share: f64,
}

/// Sum of stars over the entire fetched listing, not just the subsets
/// used for languages or bars.
pub fn total_stars(repos: &[Repo]) -> u64 {
    repos.iter().map(|r| r.stargazers_count).sum()
}

/// Merge per-repository language breakdowns into one byte tally.
pub fn tally_languages<I>(breakdowns: I) -> HashMap<String, u64>
where
    I: IntoIterator<Item = HashMap<String, u64>>,
{
    let mut tally: HashMap<String, u64> = HashMap::new();
    for breakdown in breakdowns {
        for (language, bytes) in breakdown {
            let entry = tally.entry(language).or_insert(0);
            *entry = entry.saturating_add(bytes);
        }
    }
    tally
}

/// Rank the tally descending by bytes and keep the top rows. Ties break
/// by name so the output is deterministic. An empty tally yields an empty
/// list; the renderer shows a placeholder for it.
pub fn language_shares(tally: &HashMap<String, u64>) -> Vec<LanguageShare> {
    if tally.is_empty() {
        return Vec::new();
    }

    let total: u64 = tally.values().sum();
    let denominator = total.max(1) as f64;

    let mut ranked: Vec<(&str, u64)> = tally.iter().map(|(name, &bytes)| (name.as_str(), bytes)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(TOP_LANGUAGES)
        .map(|(name, bytes)| LanguageShare {
            name: name.to_string(),
            share: bytes as f64 / denominator,
        })
        .collect()
}

/// Pixel heights for the star bars of the most recently pushed repos,
/// scaled against the subset maximum into [6, 34].
pub fn signal_bars(repos: &[Repo]) -> Vec<u32> {
    let stars: Vec<u64> = repos
        .iter()
        .take(SIGNAL_BAR_LIMIT)
        .map(|r| r.stargazers_count)
        .collect();

    let max = stars.iter().copied().max().unwrap_or(0).max(1);

    stars
        .iter()
        .map(|&s| BAR_MIN_HEIGHT + (BAR_SPAN * s as f64 / max as f64).round() as u32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(stars: u64) -> Repo {
        Repo {
            stargazers_count: stars,
            languages_url: None,
        }
    }

    #[test]
    fn total_stars_sums_the_full_listing() {
        let repos: Vec<Repo> = (0u64..40).map(repo).collect();
        // 0 + 1 + ... + 39, well past both display subsets.
        assert_eq!(total_stars(&repos), 780);
    }

    #[test]
    fn aggregates_fixture_account() {
        // handle=octocat, followers=10, public_repos=3,
        // repos=[5, 0, 12] stars, one language map {Go: 100, Python: 300}
        let repos = vec![repo(5), repo(0), repo(12)];
        assert_eq!(total_stars(&repos), 17);

        let tally = tally_languages(vec![HashMap::from([
            ("Go".to_string(), 100),
            ("Python".to_string(), 300),
        ])]);
        let shares = language_shares(&tally);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].name, "Python");
        assert_eq!((shares[0].share * 100.0).round() as u32, 75);
        assert_eq!(shares[1].name, "Go");
        assert_eq!((shares[1].share * 100.0).round() as u32, 25);
    }

    #[test]
    fn tally_accumulates_across_repositories() {
        let tally = tally_languages(vec![
            HashMap::from([("Rust".to_string(), 700), ("Shell".to_string(), 50)]),
            HashMap::from([("Rust".to_string(), 300)]),
        ]);

        assert_eq!(tally["Rust"], 1000);
        assert_eq!(tally["Shell"], 50);
    }

    #[test]
    fn shares_are_bounded_and_sum_to_at_most_one() {
        let tally = tally_languages(vec![HashMap::from([
            ("A".to_string(), 10),
            ("B".to_string(), 20),
            ("C".to_string(), 30),
            ("D".to_string(), 15),
            ("E".to_string(), 5),
            ("F".to_string(), 25),
            ("G".to_string(), 40),
        ])]);
        let shares = language_shares(&tally);

        assert_eq!(shares.len(), TOP_LANGUAGES);
        for row in &shares {
            assert!(row.share >= 0.0 && row.share <= 1.0);
        }
        let sum: f64 = shares.iter().map(|r| r.share).sum();
        assert!(sum <= 1.0 + f64::EPSILON);
    }

    #[test]
    fn share_ranking_breaks_ties_by_name() {
        let tally = HashMap::from([
            ("Zig".to_string(), 100),
            ("Ada".to_string(), 100),
            ("Nim".to_string(), 200),
        ]);
        let shares = language_shares(&tally);

        let names: Vec<&str> = shares.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Nim", "Ada", "Zig"]);
    }

    #[test]
    fn empty_tally_yields_empty_ranking() {
        assert!(language_shares(&HashMap::new()).is_empty());
        assert!(tally_languages(Vec::new()).is_empty());
    }

    #[test]
    fn bar_heights_stay_within_pixel_bounds() {
        let repos: Vec<Repo> = [0u64, 1, 3, 900, 17, 42, 900, 0].iter().map(|&s| repo(s)).collect();
        let bars = signal_bars(&repos);

        assert_eq!(bars.len(), 8);
        for &h in &bars {
            assert!((6..=34).contains(&h), "height {h} out of range");
        }
        // Subset maxima hit the top of the range.
        assert_eq!(bars[3], 34);
    }

    #[test]
    fn all_zero_stars_yield_minimum_height_bars() {
        let repos: Vec<Repo> = (0..5).map(|_| repo(0)).collect();
        assert_eq!(signal_bars(&repos), vec![6; 5]);
    }

    #[test]
    fn bars_cap_at_the_sixteen_most_recent_repos() {
        let repos: Vec<Repo> = (0u64..30).map(repo).collect();
        assert_eq!(signal_bars(&repos).len(), SIGNAL_BAR_LIMIT);
    }

    #[test]
    fn no_repos_yield_no_bars() {
        assert!(signal_bars(&[]).is_empty());
    }
}
