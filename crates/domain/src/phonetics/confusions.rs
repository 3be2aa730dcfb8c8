//! Curated homophone table
//!
//! Groups of French forms that are pronounced alike but spelled differently.
//! A spoken recognizer (or a learner) producing any member of a group is
//! accepted for a target in the same group. All entries are stored in
//! normalized form (see `normalize`).

/// Forms within one group are mutually acceptable
const CONFUSION_GROUPS: &[&[&str]] = &[
    &["mes", "mets", "met", "mais"],
    &["ces", "ses", "sais", "sait", "cest"],
    &["et", "est", "es"],
    &["a", "as"],
    &["on", "ont"],
    &["son", "sont"],
    &["ou", "houx"],
    &["la", "las"],
    &["cent", "sans", "sang", "sen"],
    &["eau", "au", "aux", "o", "oh"],
    &["vert", "verre", "vers", "ver"],
    &["mer", "mere", "maire"],
    &["foi", "fois", "foie"],
    &["vin", "vingt", "vain"],
    &["pain", "pin"],
    &["pot", "peau"],
    &["sou", "sous"],
    &["cou", "coup", "cout"],
    &["chant", "champ"],
    &["saut", "sot", "seau", "sceau"],
    &["dent", "dans"],
    &["toi", "toit"],
    &["voix", "voie", "vois", "voit"],
];

/// Check whether two normalized strings belong to the same homophone group
///
/// The table is consulted symmetrically; order of arguments never matters.
#[must_use]
pub fn are_confusable(a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }
    CONFUSION_GROUPS
        .iter()
        .any(|group| group.contains(&a) && group.contains(&b))
}
