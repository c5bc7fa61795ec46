//! Brazilian federative units

/// Acronym and full name of every state plus the federal district
pub const STATES: [(&str, &str); 27] = [
    ("AC", "Acre"),
    ("AL", "Alagoas"),
    ("AP", "Amapá"),
    ("AM", "Amazonas"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("DF", "Distrito Federal"),
    ("ES", "Espírito Santo"),
    ("GO", "Goiás"),
    ("MA", "Maranhão"),
    ("MT", "Mato Grosso"),
    ("MS", "Mato Grosso do Sul"),
    ("MG", "Minas Gerais"),
    ("PA", "Pará"),
    ("PB", "Paraíba"),
    ("PR", "Paraná"),
    ("PE", "Pernambuco"),
    ("PI", "Piauí"),
    ("RJ", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte"),
    ("RS", "Rio Grande do Sul"),
    ("RO", "Rondônia"),
    ("RR", "Roraima"),
    ("SC", "Santa Catarina"),
    ("SP", "São Paulo"),
    ("SE", "Sergipe"),
    ("TO", "Tocantins"),
];

/// Full name for an acronym, case-insensitive
#[must_use]
pub fn state_name(acronym: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(acronym.trim()))
        .map(|(_, name)| *name)
}

/// Acronym for a full name
#[must_use]
pub fn state_acronym(name: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(_, full)| *full == name.trim())
        .map(|(code, _)| *code)
}

/// Full name for either an acronym or an already-full name
///
/// Two-letter input is treated as an acronym; anything else must be a known
/// full name.
#[must_use]
pub fn normalize_state(input: &str) -> Option<&'static str> {
    let input = input.trim();
    if input.chars().count() == 2 {
        state_name(input)
    } else {
        state_acronym(input).and_then(state_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_both_ways() {
        assert_eq!(state_name("RS"), Some("Rio Grande do Sul"));
        assert_eq!(state_name("rs"), Some("Rio Grande do Sul"));
        assert_eq!(state_acronym("Pará"), Some("PA"));
        assert_eq!(state_name("XX"), None);
        assert_eq!(state_acronym("Guanabara"), None);
    }

    #[test]
    fn table_is_consistent() {
        for (code, name) in STATES {
            assert_eq!(state_name(code), Some(name));
            assert_eq!(state_acronym(name), Some(code));
        }
    }

    #[test]
    fn normalize_accepts_both_forms() {
        assert_eq!(normalize_state("SP"), Some("São Paulo"));
        assert_eq!(normalize_state("São Paulo"), Some("São Paulo"));
        assert_eq!(normalize_state("Sao Paulo"), None);
    }
}
