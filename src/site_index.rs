//! Per-locale home page assembly and related-comparison cross links.
//!
//! The home page lists exactly the comparisons that were written for its
//! locale, so it has to be built after that locale's comparison pages. The
//! orchestrator collects an [`IndexEntry`] for each written page and hands
//! the list to [`home_page`].

use crate::render::{HomePage, IndexEntry, RelatedLink, SiteContext};
use crate::slug::Route;
use crate::types::ResolvedItem;
use crate::verdict::Verdict;
use std::collections::HashSet;

/// Maximum related comparisons shown on a comparison page.
pub const MAX_RELATED: usize = 6;

/// Home card for one comparison.
pub fn index_entry(
    site: &SiteContext<'_>,
    route: &Route,
    a: &ResolvedItem<'_>,
    b: &ResolvedItem<'_>,
    verdict: &Verdict,
) -> IndexEntry {
    IndexEntry {
        title: format!("{} vs {}", a.name(), b.name()),
        href: site.url_path(route),
        winner: verdict
            .winner()
            .map(|side| side.pick(a, b).name().to_string()),
    }
}

/// Home page context listing `entries` in the order given.
pub fn home_page<'a>(
    site: SiteContext<'a>,
    entries: Vec<IndexEntry>,
    tool_count: usize,
) -> HomePage<'a> {
    HomePage {
        site,
        entries,
        tool_count,
    }
}

/// Indices of other pairs that share an item with pair `index`, in pair
/// order, skipping `exclude`, at most [`MAX_RELATED`].
///
/// `members` holds the two catalog indices of every pair.
pub fn related_indices(
    members: &[(usize, usize)],
    index: usize,
    exclude: &HashSet<usize>,
) -> Vec<usize> {
    let Some(&(a, b)) = members.get(index) else {
        return Vec::new();
    };
    members
        .iter()
        .enumerate()
        .filter(|&(i, &(x, y))| i != index && (x == a || x == b || y == a || y == b))
        .map(|(i, _)| i)
        .filter(|i| !exclude.contains(i))
        .take(MAX_RELATED)
        .collect()
}

/// Related link for another comparison.
pub fn related_link(site: &SiteContext<'_>, route: &Route, title: &str) -> RelatedLink {
    RelatedLink {
        title: title.to_string(),
        href: site.url_path(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairs::generate_pairs;
    use crate::render::tests::{bundles, site};
    use crate::test_helpers::item;
    use crate::verdict::compute_verdict;

    #[test]
    fn entry_names_cheaper_side_as_winner() {
        let bundles = bundles();
        let site = site(&bundles, 1);
        let (ra, rb) = (item("Jasper", "$49"), item("Rytr", "$9"));
        let (a, b) = (ResolvedItem::resolve(&ra, &[]), ResolvedItem::resolve(&rb, &[]));
        let verdict = compute_verdict(a.price, b.price);
        let route = Route::Comparison("jasper-vs-rytr".into());

        let entry = index_entry(&site, &route, &a, &b, &verdict);
        assert_eq!(entry.title, "Jasper vs Rytr");
        assert_eq!(entry.href, "/de/jasper-vs-rytr/");
        assert_eq!(entry.winner.as_deref(), Some("Rytr"));
    }

    #[test]
    fn tie_has_no_winner() {
        let bundles = bundles();
        let site = site(&bundles, 0);
        let (ra, rb) = (item("A", "$5"), item("B", "5"));
        let (a, b) = (ResolvedItem::resolve(&ra, &[]), ResolvedItem::resolve(&rb, &[]));
        let verdict = compute_verdict(a.price, b.price);
        let entry = index_entry(&site, &Route::Comparison("a-vs-b".into()), &a, &b, &verdict);
        assert_eq!(entry.winner, None);
        assert_eq!(entry.href, "/a-vs-b/");
    }

    fn none() -> HashSet<usize> {
        HashSet::new()
    }

    #[test]
    fn related_shares_an_item() {
        let members: Vec<(usize, usize)> = generate_pairs(&[0, 1, 2, 3])
            .iter()
            .map(|p| (p.a, p.b))
            .collect();
        // (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
        assert_eq!(related_indices(&members, 0, &none()), vec![1, 2, 3, 4]);
        assert_eq!(related_indices(&members, 5, &none()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn related_is_capped() {
        let ids: Vec<usize> = (0..10).collect();
        let members: Vec<(usize, usize)> =
            generate_pairs(&ids).iter().map(|p| (p.a, p.b)).collect();
        let related = related_indices(&members, 0, &none());
        assert_eq!(related.len(), MAX_RELATED);
        assert!(!related.contains(&0));
    }

    #[test]
    fn related_skips_excluded_and_refills() {
        let ids: Vec<usize> = (0..10).collect();
        let members: Vec<(usize, usize)> =
            generate_pairs(&ids).iter().map(|p| (p.a, p.b)).collect();
        let exclude: HashSet<usize> = [1, 2].into_iter().collect();
        let related = related_indices(&members, 0, &exclude);
        assert_eq!(related, vec![3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn related_out_of_range_is_empty() {
        assert!(related_indices(&[(0, 1)], 3, &none()).is_empty());
    }
}
