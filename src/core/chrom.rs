//! Chromosome tokens accepted in search text.

/// Remove a single leading `chr`, if present.
///
/// ```
/// use fivex_search::core::chrom::strip_chr_prefix;
///
/// assert_eq!(strip_chr_prefix("chr19"), "19");
/// assert_eq!(strip_chr_prefix("19"), "19");
/// ```
#[must_use]
pub fn strip_chr_prefix(chrom: &str) -> &str {
    chrom.strip_prefix("chr").unwrap_or(chrom)
}

/// Check whether `name` is an assembled human chromosome: 1-22, X, Y or MT,
/// optionally with a lowercase `chr` prefix.
#[must_use]
pub fn is_primary_chromosome(name: &str) -> bool {
    matches!(
        strip_chr_prefix(name),
        "1" | "2"
            | "3"
            | "4"
            | "5"
            | "6"
            | "7"
            | "8"
            | "9"
            | "10"
            | "11"
            | "12"
            | "13"
            | "14"
            | "15"
            | "16"
            | "17"
            | "18"
            | "19"
            | "20"
            | "21"
            | "22"
            | "X"
            | "Y"
            | "MT"
    )
}
