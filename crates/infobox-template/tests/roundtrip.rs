//! Whole-article properties of locate / parse / render / replace

use infobox_template::prelude::*;
use infobox_template::{parse_block, FieldMap};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const ARTICLE: &str = "'''Ijuí''' é um [[município]] do [[Rio Grande do Sul]].{{Ref-section}}\n\
{{Info/Município do Brasil\n\
| nome = Ijuí\n\
| padroeiro = São Geraldo\n\
| área = 689.132\n\
| população = 83475\n\
| população_ref = <ref name=\"pop\">{{Citar web |url=https://ibge.gov.br |titulo=Estimativas}}</ref>\n\
| idh = 0.781\n\
| pib = {{fmtn |2500000.50}}\n\
| população_pos = [[Lista|RS: 14º]] BR: 400º\n\
}}\n\
== História ==\n\
Fundada em 1890.<ref name=\"pop\" /> { chave solta }\n";

fn fields_without_deprecated(fields: &FieldMap) -> Vec<(String, String)> {
    fields
        .iter()
        .filter(|(k, _)| !MUNICIPALITY.is_deprecated(k))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[test]
fn roundtrip_preserves_outside_and_fields() {
    let scanner = DocumentScanner::new();
    let span = scanner.locate(ARTICLE, &MUNICIPALITY.marker()).unwrap();
    let block = span.slice(ARTICLE).unwrap();
    let model = TemplateModel::parse(&MUNICIPALITY, ARTICLE, block);

    let rendered = model.render();
    let updated = scanner.replace(ARTICLE, span, &rendered).unwrap();

    assert_eq!(&updated[..span.start], &ARTICLE[..span.start]);
    assert_eq!(&updated[span.start + rendered.len()..], &ARTICLE[span.end..]);

    let reparsed = parse_block(&rendered).fields;
    assert_eq!(
        fields_without_deprecated(&reparsed),
        fields_without_deprecated(model.fields())
    );
    assert!(!rendered.contains("padroeiro"));
}

#[test]
fn rerun_is_idempotent() {
    let edit = |article: &str| {
        let (span, mut model) = TemplateModel::from_document(&MUNICIPALITY, article).unwrap();
        model.edit_population(84_000, 2022, Some("<ref name=\"pop\" />"));
        model.edit_hdi(0.8, 2010, None);
        let args = RankingArgs::new(RankingKind::Population)
            .state("RS")
            .positions(3, 120)
            .state_article("Lista de municípios do Rio Grande do Sul por população");
        model.edit_ranking_field(&args).unwrap();
        DocumentScanner::new().replace(article, span, &model.render()).unwrap()
    };

    let once = edit(ARTICLE);
    let twice = edit(&once);
    assert_eq!(once, twice);
    assert!(once.contains(
        "| população_pos = [[Lista de municípios do Rio Grande do Sul por população|RS: 3º]] BR: 120º\n"
    ));
    assert!(once.contains("| idh = 0.800\n"));
}

#[test]
fn shared_citation_still_renders() {
    let (span, mut model) = TemplateModel::from_document(&MUNICIPALITY, ARTICLE).unwrap();
    let safety = model.edit_population(84_000, 2022, None);
    assert_eq!(safety, ReferenceSafety::Unsafe);
    assert!(model.diagnostics().iter().any(Diagnostic::is_warning));

    let updated = DocumentScanner::new().replace(ARTICLE, span, &model.render()).unwrap();
    assert!(updated.contains("| população = 84000\n"));
}

#[test]
fn document_without_template() {
    let err = TemplateModel::from_document(&MUNICIPALITY, "Só texto.").unwrap_err();
    assert!(matches!(err, ScanError::NotFound { .. }));
}

fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .,]{1,12}",
        "[a-z]{1,6}".prop_map(|s| format!("{{{{fmtn |{s}}}}}")),
        "[a-z]{1,6}".prop_map(|s| format!("<ref>{{{{Citar web |url={s}}}}}</ref>")),
        "[a-z]{1,6}".prop_map(|s| format!("[[{s}|{s}]]")),
    ]
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("nome".to_string()),
        Just("população".to_string()),
        Just("idh".to_string()),
        Just("pib".to_string()),
        Just("padroeiro".to_string()),
        "z[a-z]{1,5}",
    ]
}

proptest! {
    #[test]
    fn nested_pairs_do_not_move_span_end(extra in 0usize..5, tail in "[a-z ]{0,10}") {
        let nested = "{{x|".repeat(extra) + &"}}".repeat(extra);
        let article = format!("a {{{{Info/Município do Brasil\n| nome = b{nested}\n}}}}{tail}");
        let span = DocumentScanner::new().locate(&article, &MUNICIPALITY.marker()).unwrap();
        prop_assert_eq!(&article[span.end..], tail.as_str());
    }

    #[test]
    fn render_ignores_insertion_order(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..8),
    ) {
        let mut forward = TemplateModel::parse(&MUNICIPALITY, "", "{{Info/Município do Brasil}}");
        let mut backward = forward.clone();
        let mut dedup = std::collections::BTreeMap::new();
        for (k, v) in &entries {
            dedup.insert(k.clone(), v.clone());
        }
        for (k, v) in &dedup {
            forward.set(k.clone(), v.clone());
        }
        for (k, v) in dedup.iter().rev() {
            backward.set(k.clone(), v.clone());
        }

        let known: Vec<_> = forward
            .render()
            .lines()
            .filter(|l| !l.starts_with("| z"))
            .map(str::to_string)
            .collect();
        let known_back: Vec<_> = backward
            .render()
            .lines()
            .filter(|l| !l.starts_with("| z"))
            .map(str::to_string)
            .collect();
        prop_assert_eq!(known, known_back);
        prop_assert!(!forward.render().contains("padroeiro"));
    }

    #[test]
    fn parse_render_parse_is_stable(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..8),
    ) {
        let mut block = String::from("{{Info/Município do Brasil\n");
        for (k, v) in &entries {
            block.push_str(&format!("|{k}={v}\n"));
        }
        block.push_str("}}");

        let first = TemplateModel::parse(&MUNICIPALITY, &block, &block).render();
        let second = TemplateModel::parse(&MUNICIPALITY, &first, &first).render();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn set_twice_equals_once(key in key_strategy(), value in value_strategy()) {
        let mut once = FieldMap::new();
        once.set(key.clone(), value.clone());
        let mut twice = once.clone();
        twice.set(key, value);
        prop_assert_eq!(once, twice);
    }
}
