//! Locale bundles.
//!
//! A [`LocaleBundle`] is everything needed to render one language: the
//! label strings, the flag shown in the header, and the URL prefix its pages
//! live under. Label text is compiled in; the site config only chooses which
//! locales are active and which one is the default (served from the root).
//!
//! Sentence labels carry `{placeholders}` that the renderer fills in:
//!
//! | Label | Placeholders |
//! |-------|--------------|
//! | `verdict_decided` | `{cheaper}`, `{pricier}`, `{delta}` |
//! | `verdict_tie` | `{a}`, `{b}` |
//! | `savings` | `{amount}` |
//! | `home_summary` | `{tools}`, `{pairs}` |

/// Localized label strings for one language.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub price: &'static str,
    pub score: &'static str,
    pub feature: &'static str,
    pub winner: &'static str,
    pub tie: &'static str,
    pub save: &'static str,
    pub savings: &'static str,
    pub visit: &'static str,
    pub calc_title: &'static str,
    pub input_label: &'static str,
    pub calc_btn: &'static str,
    pub related: &'static str,
    pub pros: &'static str,
    pub cons: &'static str,
    pub best_value: &'static str,
    pub top_performance: &'static str,
    pub verdict_decided: &'static str,
    pub verdict_tie: &'static str,
    pub pending: &'static str,
    pub affiliate_note: &'static str,
    pub home_heading: &'static str,
    pub home_summary: &'static str,
    pub privacy: &'static str,
    pub terms: &'static str,
    pub languages: &'static str,
}

/// Compiled-in definition of a supported locale.
#[derive(Debug)]
pub struct LocaleDef {
    pub code: &'static str,
    pub flag: &'static str,
    pub labels: Labels,
}

/// A locale as used in one build: definition plus resolved path prefix.
#[derive(Debug, Clone)]
pub struct LocaleBundle {
    pub code: &'static str,
    pub flag: &'static str,
    pub labels: &'static Labels,
    /// Empty for the default locale, `/{code}` otherwise.
    pub path_prefix: String,
}

impl LocaleBundle {
    pub fn is_default(&self) -> bool {
        self.path_prefix.is_empty()
    }
}

/// Look up a compiled-in locale by code.
pub fn find(code: &str) -> Option<&'static LocaleDef> {
    SUPPORTED.iter().find(|def| def.code == code)
}

pub fn is_supported(code: &str) -> bool {
    find(code).is_some()
}

/// Codes of every compiled-in locale, in declaration order.
pub fn supported_codes() -> Vec<&'static str> {
    SUPPORTED.iter().map(|def| def.code).collect()
}

/// Build bundles for the active locales, in the given order.
///
/// Unknown codes are skipped; config validation rejects them earlier.
pub fn bundles_for(codes: &[String], default_code: &str) -> Vec<LocaleBundle> {
    codes
        .iter()
        .filter_map(|code| find(code))
        .map(|def| LocaleBundle {
            code: def.code,
            flag: def.flag,
            labels: &def.labels,
            path_prefix: if def.code == default_code {
                String::new()
            } else {
                format!("/{}", def.code)
            },
        })
        .collect()
}

pub static SUPPORTED: [LocaleDef; 5] = [
    LocaleDef {
        code: "en",
        flag: "🇺🇸",
        labels: Labels {
            title: "Comparison",
            price: "Price",
            score: "Score",
            feature: "Feature",
            winner: "Winner",
            tie: "Tie",
            save: "Save",
            savings: "Save {amount} per year",
            visit: "Visit Site",
            calc_title: "ROI Calculator: How much will you save?",
            input_label: "Months to use:",
            calc_btn: "Calculate Savings",
            related: "Related comparisons",
            pros: "Pros",
            cons: "Cons",
            best_value: "Best Value",
            top_performance: "Top Performance",
            verdict_decided: "{cheaper} costs {delta} less per month than {pricier}.",
            verdict_tie: "{a} and {b} show no price difference.",
            pending: "Info coming soon",
            affiliate_note: "Official Affiliate Partner",
            home_heading: "Software comparisons",
            home_summary: "{tools} tools, {pairs} comparisons",
            privacy: "Privacy",
            terms: "Terms",
            languages: "Languages",
        },
    },
    LocaleDef {
        code: "es",
        flag: "🇪🇸",
        labels: Labels {
            title: "Comparación",
            price: "Precio",
            score: "Puntuación",
            feature: "Característica",
            winner: "Ganador",
            tie: "Empate",
            save: "Ahorra",
            savings: "Ahorra {amount} al año",
            visit: "Visitar Sitio",
            calc_title: "Calculadora ROI: ¿Cuánto ahorrarás?",
            input_label: "Meses de uso:",
            calc_btn: "Calcular Ahorro",
            related: "Comparaciones relacionadas",
            pros: "Ventajas",
            cons: "Desventajas",
            best_value: "Mejor Precio",
            top_performance: "Máximo Rendimiento",
            verdict_decided: "{cheaper} cuesta {delta} menos al mes que {pricier}.",
            verdict_tie: "{a} y {b} no tienen diferencia de precio.",
            pending: "Información próximamente",
            affiliate_note: "Socio afiliado oficial",
            home_heading: "Comparaciones de software",
            home_summary: "{tools} herramientas, {pairs} comparaciones",
            privacy: "Privacidad",
            terms: "Términos",
            languages: "Idiomas",
        },
    },
    LocaleDef {
        code: "de",
        flag: "🇩🇪",
        labels: Labels {
            title: "Vergleich",
            price: "Preis",
            score: "Bewertung",
            feature: "Funktion",
            winner: "Gewinner",
            tie: "Unentschieden",
            save: "Sparen",
            savings: "Sparen Sie {amount} pro Jahr",
            visit: "Webseite",
            calc_title: "ROI-Rechner: Wie viel sparen Sie?",
            input_label: "Nutzungsmonate:",
            calc_btn: "Ersparnis berechnen",
            related: "Ähnliche Vergleiche",
            pros: "Vorteile",
            cons: "Nachteile",
            best_value: "Bester Preis",
            top_performance: "Top-Leistung",
            verdict_decided: "{cheaper} kostet {delta} weniger pro Monat als {pricier}.",
            verdict_tie: "{a} und {b} haben keinen Preisunterschied.",
            pending: "Informationen folgen",
            affiliate_note: "Offizieller Affiliate-Partner",
            home_heading: "Software-Vergleiche",
            home_summary: "{tools} Tools, {pairs} Vergleiche",
            privacy: "Datenschutz",
            terms: "Nutzungsbedingungen",
            languages: "Sprachen",
        },
    },
    LocaleDef {
        code: "fr",
        flag: "🇫🇷",
        labels: Labels {
            title: "Comparaison",
            price: "Prix",
            score: "Note",
            feature: "Fonctionnalité",
            winner: "Gagnant",
            tie: "Égalité",
            save: "Économisez",
            savings: "Économisez {amount} par an",
            visit: "Visiter",
            calc_title: "Calculateur ROI : Combien économiserez-vous ?",
            input_label: "Mois d'utilisation :",
            calc_btn: "Calculer",
            related: "Comparaisons associées",
            pros: "Avantages",
            cons: "Inconvénients",
            best_value: "Meilleur Prix",
            top_performance: "Meilleure Performance",
            verdict_decided: "{cheaper} coûte {delta} de moins par mois que {pricier}.",
            verdict_tie: "{a} et {b} ne présentent aucune différence de prix.",
            pending: "Informations à venir",
            affiliate_note: "Partenaire affilié officiel",
            home_heading: "Comparatifs de logiciels",
            home_summary: "{tools} outils, {pairs} comparaisons",
            privacy: "Confidentialité",
            terms: "Conditions",
            languages: "Langues",
        },
    },
    LocaleDef {
        code: "pt",
        flag: "🇧🇷",
        labels: Labels {
            title: "Comparação",
            price: "Preço",
            score: "Nota",
            feature: "Recurso",
            winner: "Vencedor",
            tie: "Empate",
            save: "Economize",
            savings: "Economize {amount} por ano",
            visit: "Visitar",
            calc_title: "Calculadora ROI: Quanto você vai economizar?",
            input_label: "Meses de uso:",
            calc_btn: "Calcular Economia",
            related: "Comparações relacionadas",
            pros: "Prós",
            cons: "Contras",
            best_value: "Melhor Preço",
            top_performance: "Melhor Desempenho",
            verdict_decided: "{cheaper} custa {delta} a menos por mês que {pricier}.",
            verdict_tie: "{a} e {b} não têm diferença de preço.",
            pending: "Informações em breve",
            affiliate_note: "Parceiro afiliado oficial",
            home_heading: "Comparações de software",
            home_summary: "{tools} ferramentas, {pairs} comparações",
            privacy: "Privacidade",
            terms: "Termos",
            languages: "Idiomas",
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn default_locale_has_empty_prefix() {
        let bundles = bundles_for(&codes(&["en", "es"]), "en");
        assert_eq!(bundles[0].path_prefix, "");
        assert!(bundles[0].is_default());
        assert_eq!(bundles[1].path_prefix, "/es");
        assert!(!bundles[1].is_default());
    }

    #[test]
    fn bundles_keep_config_order() {
        let bundles = bundles_for(&codes(&["fr", "en", "de"]), "en");
        let order: Vec<&str> = bundles.iter().map(|b| b.code).collect();
        assert_eq!(order, vec!["fr", "en", "de"]);
    }

    #[test]
    fn unknown_codes_skipped() {
        let bundles = bundles_for(&codes(&["en", "xx"]), "en");
        assert_eq!(bundles.len(), 1);
    }

    #[test]
    fn labels_are_localized() {
        assert_eq!(find("de").unwrap().labels.price, "Preis");
        assert_eq!(find("es").unwrap().labels.winner, "Ganador");
    }

    #[test]
    fn supported_codes_in_order() {
        assert_eq!(supported_codes(), vec!["en", "es", "de", "fr", "pt"]);
    }

    #[test]
    fn every_sentence_label_keeps_its_placeholders() {
        for def in SUPPORTED.iter() {
            let l = &def.labels;
            for needle in ["{cheaper}", "{pricier}", "{delta}"] {
                assert!(l.verdict_decided.contains(needle), "{} verdict_decided", def.code);
            }
            assert!(l.verdict_tie.contains("{a}") && l.verdict_tie.contains("{b}"));
            assert!(l.savings.contains("{amount}"), "{} savings", def.code);
            assert!(l.home_summary.contains("{tools}") && l.home_summary.contains("{pairs}"));
        }
    }
}
