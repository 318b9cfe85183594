use std::collections::HashMap;

/// Lazily yields every `width`-character window of `text` in which all
/// characters satisfy `filter`.
///
/// Windows are borrowed subslices, produced for every character start
/// position; UTF-8 multibyte characters count as one character. Windows
/// straddling a rejected character are skipped, which keeps runs separated
/// by excluded characters (whitespace, punctuation) from bleeding into one
/// another.
///
/// Yields nothing when `width` is 0 or exceeds the character count.
pub fn slide_filtered<'a, F>(
	text: &'a str,
	filter: F,
	width: usize,
) -> impl Iterator<Item = &'a str>
where
	F: Fn(char) -> bool + 'a,
{
	let take = if width == 0 { 0 } else { usize::MAX };
	text.char_indices()
		.zip(text.char_indices().skip(width.saturating_sub(1)))
		.take(take)
		.filter_map(move |((start, _), (end, last))| {
			let window = &text[start..end + last.len_utf8()];
			window.chars().all(&filter).then_some(window)
		})
}

/// Counts qualifying windows and returns `(window, relative_frequency)`
/// pairs, ordered by descending frequency with ties broken by the order
/// in which windows were first encountered.
///
/// Frequencies are counts normalized by the total number of qualifying
/// windows, so they sum to 1.0. When no window qualifies the result is
/// empty.
pub fn frequencies<'a, F>(text: &'a str, filter: F, width: usize) -> Vec<(&'a str, f64)>
where
	F: Fn(char) -> bool + 'a,
{
	// Count alongside a first-seen rank; the map alone cannot provide the
	// tie-break order.
	let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
	let mut total = 0u64;

	for window in slide_filtered(text, filter, width) {
		let rank = counts.len();
		counts.entry(window).or_insert((0, rank)).0 += 1;
		total += 1;
	}

	if total == 0 {
		return Vec::new();
	}

	let mut ordered: Vec<(&str, u64, usize)> =
		counts.into_iter().map(|(window, (count, rank))| (window, count, rank)).collect();
	ordered.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

	ordered.into_iter().map(|(window, count, _)| (window, count as f64 / total as f64)).collect()
}
