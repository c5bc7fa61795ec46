//! Reference guard behaviour over whole articles

use infobox_reference::{Citation, ReferenceGuard, ReferenceSafety};
use proptest::prelude::*;

const ARTICLE: &str = r#"'''Ijuí''' é um município.<ref name="pop2021">{{Citar web |url=https://ibge.gov.br |titulo=Estimativas}}</ref>
{{Info/Município do Brasil
| população = 83475
| população_ref = <ref name="pop2021" />
| área_ref = <ref name="area">{{Citar web |url=https://ibge.gov.br/territorio}}</ref>
| idh_ref = <ref>{{Citar web |url=https://atlasbrasil.org.br}}</ref>
}}
"#;

#[test]
fn shared_citation_is_unsafe() {
    let guard = ReferenceGuard::new();
    assert_eq!(
        guard.check_replacement(ARTICLE, r#"<ref name="pop2021" />"#),
        ReferenceSafety::Unsafe
    );
}

#[test]
fn single_use_citation_is_safe() {
    let guard = ReferenceGuard::new();
    let prior = r#"<ref name="area">{{Citar web |url=https://ibge.gov.br/territorio}}</ref>"#;
    assert_eq!(guard.check_replacement(ARTICLE, prior), ReferenceSafety::Safe);
}

#[test]
fn unnamed_citation_is_not_named() {
    let guard = ReferenceGuard::new();
    let prior = "<ref>{{Citar web |url=https://atlasbrasil.org.br}}</ref>";
    assert_eq!(guard.check_replacement(ARTICLE, prior), ReferenceSafety::NotNamed);
}

#[test]
fn moving_body_to_reuse_site() {
    let guard = ReferenceGuard::new();
    let definition = Citation::new("censo", "https://censo", "Censo", "IBGE", 2022)
        .render(chrono::NaiveDate::from_ymd_opt(2023, 7, 1).unwrap());
    let body = guard.extract_body(&definition).unwrap().unwrap();

    let moved = guard.inject_body(r#"<ref name="censo"/>"#, &body).unwrap();
    assert_eq!(guard.describe(&moved).unwrap().body.as_deref(), Some(body.as_str()));
}

proptest! {
    #[test]
    fn safety_tracks_reuse_count(name in "[A-Z][A-Za-z0-9_]{2,12}", reuses in 0usize..4) {
        let guard = ReferenceGuard::new();
        let prior = format!("<ref name=\"{name}\">{{{{cite}}}}</ref>");
        let mut document = format!("| ref = {prior}\n");
        for _ in 0..reuses {
            document.push_str(&format!(" <ref name=\"{name}\" />"));
        }

        let expected = if reuses == 0 { ReferenceSafety::Safe } else { ReferenceSafety::Unsafe };
        prop_assert_eq!(guard.check_replacement(&document, &prior), expected);
    }

    #[test]
    fn quoted_names_survive_spaces_and_brackets(name in "[a-z]{1,6}( [a-z>]{1,6})?") {
        let guard = ReferenceGuard::new();
        let markup = format!("<ref name=\"{name}\">body</ref>");
        prop_assert_eq!(guard.extract_ref_name(&markup).unwrap(), Some(name));
    }
}
