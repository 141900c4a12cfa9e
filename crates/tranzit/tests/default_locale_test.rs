//! Behavior before any locale is configured.
//!
//! These live in their own test binary: the locale is process-wide, and
//! every test in `integration_test.rs` installs one.

use tranzit::{read_str, Filter};

const SAMPLE: &str = "
Alexandru,Catrina,Împrumut,2019-10-16,-1500.00
Alexandru,(cafenea),Cafea,2019-11-22,-23.80
Ordonator,Alexandru,Transfer,2019-11-27,9000.00
";

#[test]
fn month_name_lookup_matches_nothing_without_months() {
    let collection = read_str(SAMPLE).unwrap();
    // Not an error: the comparator prepares with an epoch baseline and
    // simply never matches.
    let out = collection.filter("[d=noiembrie 2019]").unwrap();
    assert_eq!(out.len(), 0);
}

#[test]
fn diacritics_do_not_fold_without_rules() {
    let collection = read_str(SAMPLE).unwrap();
    let out = collection.filter("[c=imprumut]").unwrap();
    assert_eq!(out.len(), 0);

    // The diacritic form itself still matches by prefix.
    let out = collection.filter("[c=împrumut]").unwrap();
    assert_eq!(out.len(), 1);
}

#[test]
fn iso_dates_need_no_locale() {
    let collection = read_str(SAMPLE).unwrap();
    let out = collection.filter("[d=2019-11-22]").unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].label, "Cafea");
}
