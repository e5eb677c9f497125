//! Locales, UI strings and tag labels.
//!
//! Every locale is an overlay on the English base strings: a lookup first
//! checks the locale's own strings (built-in, then `[strings.<locale>]` from
//! `config.toml`), then English, and finally returns the key itself so a
//! missing string is visible rather than fatal.
//!
//! Tag labels live in the same map under `tags.<slug>` keys, but
//! [`Translator::tag_label`] returns `None` for unknown slugs instead of the
//! key. Falling back to the raw slug is the caller's job.
//!
//! ## Interpolation
//!
//! Templates support three placeholder forms, applied in this order and only
//! when parameters are supplied:
//!
//! | Form | Example | Result (`count = 1` / `count = 3`) |
//! |------|---------|------------------------------------|
//! | ICU plural | `{count, plural, one {# recipe} other {# recipes}}` | `1 recipe` / `3 recipes` |
//! | Short plural | `{count} {recipe\|recipes}` | `1 recipe` / `3 recipes` |
//! | Named | `{name}` | the parameter, or empty when absent |

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::types::ParseError;

/// A supported site language.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    Es,
    Nl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

const RTL_LANGUAGES: &[&str] = &["ar", "he", "fa", "ur"];

/// Reading direction for a language code.
pub fn text_direction(code: &str) -> TextDirection {
    if RTL_LANGUAGES.contains(&code) {
        TextDirection::Rtl
    } else {
        TextDirection::Ltr
    }
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Fr, Locale::Es, Locale::Nl];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::Es => "es",
            Locale::Nl => "nl",
        }
    }

    /// Native display name, as shown in the language menu.
    pub fn label(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Fr => "Français",
            Locale::Es => "Español",
            Locale::Nl => "Nederlands",
        }
    }

    pub fn direction(self) -> TextDirection {
        text_direction(self.code())
    }

    /// URL prefix for this locale's pages: empty for the default locale,
    /// `/<code>` otherwise.
    pub fn url_prefix(self, default: Locale) -> String {
        if self == default {
            String::new()
        } else {
            format!("/{}", self.code())
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| ParseError::new("locale", s, "en, fr, es, nl"))
    }
}

// =============================================================================
// Parameters and interpolation
// =============================================================================

/// Named interpolation parameters.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: BTreeMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl ToString) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Shorthand for `set("count", n)`, the parameter plural forms read.
    pub fn count(self, n: impl ToString) -> Self {
        self.set("count", n)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.get(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
    }
}

static ICU_PLURAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(\w+)\s*,\s*plural\s*,\s*one\s*\{([^}]*)\}\s*other\s*\{([^}]*)\}\s*\}")
        .expect("ICU plural pattern is valid")
});
static SHORT_PLURAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}|]+)\|([^{}|]+)\}").expect("plural pattern is valid"));
static NAMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// Render integral values without a fractional part (`3`, not `3.0`).
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Substitute plural forms and named placeholders in `template`.
pub fn interpolate(template: &str, params: &Params) -> String {
    let step = ICU_PLURAL.replace_all(template, |caps: &Captures| {
        let n = params.number(&caps[1]);
        let chosen = if n == Some(1.0) { &caps[2] } else { &caps[3] };
        match n {
            Some(n) => chosen.replace('#', &format_number(n)),
            None => chosen.to_string(),
        }
    });

    let count = params.number("count");
    let step = SHORT_PLURAL.replace_all(&step, |caps: &Captures| {
        if count == Some(1.0) {
            caps[1].to_string()
        } else {
            caps[2].to_string()
        }
    });

    NAMED
        .replace_all(&step, |caps: &Captures| {
            params.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}

// =============================================================================
// Translator
// =============================================================================

/// Per-locale string overrides keyed by locale code, as loaded from config.
pub type LocaleOverrides = BTreeMap<String, BTreeMap<String, String>>;

/// Resolved string table for one locale.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    strings: HashMap<String, String>,
}

impl Translator {
    /// Translator using only the built-in dictionaries.
    pub fn new(locale: Locale) -> Self {
        Self::with_overrides(locale, &LocaleOverrides::new(), &LocaleOverrides::new())
    }

    /// Translator with config overrides for UI strings and tag labels layered
    /// over the built-in dictionaries.
    pub fn with_overrides(locale: Locale, strings: &LocaleOverrides, tags: &LocaleOverrides) -> Self {
        let mut map = HashMap::new();
        let mut layer = |l: Locale| {
            for (key, value) in builtin_strings(l) {
                map.insert((*key).to_string(), (*value).to_string());
            }
            for (slug, label) in builtin_tags(l) {
                map.insert(format!("tags.{slug}"), (*label).to_string());
            }
            if let Some(overrides) = strings.get(l.code()) {
                map.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            if let Some(overrides) = tags.get(l.code()) {
                map.extend(overrides.iter().map(|(k, v)| (format!("tags.{k}"), v.clone())));
            }
        };
        layer(Locale::En);
        if locale != Locale::En {
            layer(locale);
        }
        Self {
            locale,
            strings: map,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Raw string for `key`, or the key itself when no dictionary has it.
    pub fn t(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// String for `key` with placeholders filled from `params`.
    pub fn t_with(&self, key: &str, params: &Params) -> String {
        match self.strings.get(key) {
            Some(template) => interpolate(template, params),
            None => key.to_string(),
        }
    }

    /// Localized label for a tag slug, if one is known.
    pub fn tag_label(&self, slug: &str) -> Option<&str> {
        self.strings.get(&format!("tags.{slug}")).map(String::as_str)
    }

    /// Localized label for a tag slug, falling back to the slug.
    pub fn tag_label_or_slug(&self, slug: &str) -> String {
        self.tag_label(slug).unwrap_or(slug).to_string()
    }
}

// =============================================================================
// Built-in dictionaries
// =============================================================================

fn builtin_strings(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => EN_STRINGS,
        Locale::Fr => FR_STRINGS,
        Locale::Es => ES_STRINGS,
        Locale::Nl => NL_STRINGS,
    }
}

fn builtin_tags(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => EN_TAGS,
        Locale::Fr => FR_TAGS,
        Locale::Es => ES_TAGS,
        Locale::Nl => NL_TAGS,
    }
}

const EN_STRINGS: &[(&str, &str)] = &[
    ("nav.home", "Home"),
    ("nav.recipes", "Recipes"),
    ("nav.about", "About"),
    ("nav.language", "Language"),
    ("search.tags", "Tags"),
    ("home.hi", "Hey!"),
    ("home.featured", "Featured"),
    ("home.latest", "Latest recipes"),
    ("home.seasonal", "In season"),
    ("home.popular_tags", "Popular tags"),
    ("home.quick_tags", "Quick picks"),
    ("search.filter_recipes", "Filter recipes"),
    ("search.search", "Search"),
    ("search.title_or_tag", "Title or tag"),
    ("search.sort", "Sort"),
    ("search.sort_newest", "Newest"),
    ("search.sort_oldest", "Oldest"),
    ("search.fastest", "Fastest"),
    ("search.longest", "Longest"),
    ("search.difficulty", "Difficulty"),
    ("search.no_tags_yet", "No tags yet"),
    ("search.reset_filters", "Reset filters"),
    ("search.no_results", "No recipes match your filters."),
    ("search.results", "{count} {recipe|recipes}"),
    ("difficulty.easy", "Easy"),
    ("difficulty.medium", "Medium"),
    ("difficulty.hard", "Hard"),
    ("sections.ingredients", "Ingredients"),
    ("sections.steps", "Steps"),
    ("sections.notes", "Notes"),
    ("sections.nutritional-values", "Nutritional Values"),
    ("sections.missing_ingredients", "Missing ingredients"),
    ("sections.missing_steps", "Missing steps"),
    ("checklist.reset", "Reset checklist"),
    ("nutrition.per_serving", "Per serving"),
    ("nutrition.nutrient", "Nutrient"),
    ("nutrition.amount", "Amount"),
    ("nutrition.calories", "Calories"),
    ("nutrition.protein", "Protein"),
    ("nutrition.carbs", "Carbs"),
    ("nutrition.fat", "Fat"),
    ("nutrition.fiber", "Fiber"),
    ("nutrition.sugar", "Sugar"),
    ("nutrition.sodium", "Sodium"),
    ("time.total", "{minutes} min"),
];

const FR_STRINGS: &[(&str, &str)] = &[
    ("nav.home", "Accueil"),
    ("nav.recipes", "Recettes"),
    ("nav.about", "À propos"),
    ("nav.language", "Langue"),
    ("search.tags", "Étiquettes"),
    ("home.hi", "Coucou !"),
    ("home.featured", "À la une"),
    ("home.latest", "Dernières recettes"),
    ("home.seasonal", "De saison"),
    ("home.popular_tags", "Étiquettes populaires"),
    ("home.quick_tags", "Accès rapide"),
    ("search.filter_recipes", "Filtrer les recettes"),
    ("search.search", "Rechercher"),
    ("search.title_or_tag", "Titre ou étiquette"),
    ("search.sort", "Trier"),
    ("search.sort_newest", "Plus récentes"),
    ("search.sort_oldest", "Plus anciennes"),
    ("search.fastest", "Plus rapides"),
    ("search.longest", "Plus longues"),
    ("search.difficulty", "Difficulté"),
    ("search.no_tags_yet", "Pas encore d'étiquettes"),
    ("search.reset_filters", "Réinitialiser les filtres"),
    ("search.no_results", "Aucune recette ne correspond à vos filtres."),
    ("search.results", "{count} {recette|recettes}"),
    ("difficulty.easy", "Facile"),
    ("difficulty.medium", "Moyen"),
    ("difficulty.hard", "Difficile"),
    ("sections.ingredients", "Ingrédients"),
    ("sections.steps", "Étapes"),
    ("sections.notes", "Notes"),
    ("sections.nutritional-values", "Valeurs nutritionnelles"),
    ("sections.missing_ingredients", "Ingrédients manquants"),
    ("sections.missing_steps", "Étapes manquantes"),
    ("checklist.reset", "Réinitialiser la liste"),
    ("nutrition.per_serving", "Par portion"),
    ("nutrition.nutrient", "Nutriment"),
    ("nutrition.amount", "Quantité"),
    ("nutrition.calories", "Calories"),
    ("nutrition.protein", "Protéines"),
    ("nutrition.carbs", "Glucides"),
    ("nutrition.fat", "Lipides"),
    ("nutrition.fiber", "Fibres"),
    ("nutrition.sugar", "Sucres"),
    ("nutrition.sodium", "Sodium"),
];

const ES_STRINGS: &[(&str, &str)] = &[
    ("nav.home", "Inicio"),
    ("nav.recipes", "Recetas"),
    ("nav.about", "Acerca de mí"),
    ("nav.language", "Idioma"),
    ("search.tags", "Etiquetas"),
    ("home.hi", "¡Hola!"),
    ("home.featured", "Destacada"),
    ("home.latest", "Últimas recetas"),
    ("home.seasonal", "De temporada"),
    ("home.popular_tags", "Etiquetas populares"),
    ("search.filter_recipes", "Filtrar recetas"),
    ("search.search", "Buscar"),
    ("search.title_or_tag", "Título o etiqueta"),
    ("search.sort", "Ordenar"),
    ("search.sort_newest", "Más recientes"),
    ("search.sort_oldest", "Más antiguas"),
    ("search.fastest", "Más rápidas"),
    ("search.longest", "Más largas"),
    ("search.difficulty", "Dificultad"),
    ("search.reset_filters", "Restablecer filtros"),
    ("search.no_results", "Ninguna receta coincide con tus filtros."),
    ("search.results", "{count} {receta|recetas}"),
    ("difficulty.easy", "Fácil"),
    ("difficulty.medium", "Media"),
    ("difficulty.hard", "Difícil"),
    ("sections.ingredients", "Ingredientes"),
    ("sections.steps", "Pasos"),
    ("sections.notes", "Notas"),
    ("sections.nutritional-values", "Valores nutricionales"),
    ("nutrition.per_serving", "Por porción"),
    ("nutrition.protein", "Proteínas"),
    ("nutrition.carbs", "Carbohidratos"),
    ("nutrition.fat", "Grasas"),
    ("nutrition.fiber", "Fibra"),
    ("nutrition.sugar", "Azúcar"),
    ("nutrition.sodium", "Sodio"),
];

const NL_STRINGS: &[(&str, &str)] = &[
    ("nav.recipes", "Recepten"),
    ("nav.about", "Over mij"),
    ("nav.language", "Taal"),
    ("search.tags", "Tags"),
    ("home.latest", "Nieuwste recepten"),
    ("home.seasonal", "Van het seizoen"),
    ("home.popular_tags", "Populaire tags"),
    ("search.filter_recipes", "Recepten filteren"),
    ("search.search", "Zoeken"),
    ("search.title_or_tag", "Titel of tag"),
    ("search.sort", "Sorteren"),
    ("search.sort_newest", "Nieuwste"),
    ("search.sort_oldest", "Oudste"),
    ("search.fastest", "Snelste"),
    ("search.longest", "Langste"),
    ("search.difficulty", "Moeilijkheid"),
    ("search.reset_filters", "Filters wissen"),
    ("search.no_results", "Geen recepten gevonden."),
    ("search.results", "{count} {recept|recepten}"),
    ("difficulty.easy", "Makkelijk"),
    ("difficulty.medium", "Gemiddeld"),
    ("difficulty.hard", "Moeilijk"),
    ("sections.ingredients", "Ingrediënten"),
    ("sections.steps", "Stappen"),
    ("sections.notes", "Notities"),
    ("sections.nutritional-values", "Voedingswaarden"),
    ("nutrition.per_serving", "Per portie"),
    ("nutrition.protein", "Eiwitten"),
    ("nutrition.carbs", "Koolhydraten"),
    ("nutrition.fat", "Vetten"),
    ("nutrition.fiber", "Vezels"),
    ("nutrition.sugar", "Suikers"),
    ("nutrition.sodium", "Natrium"),
];

const EN_TAGS: &[(&str, &str)] = &[
    ("asian", "Asian"),
    ("european", "European"),
    ("american", "American"),
    ("mediterranean", "Mediterranean"),
    ("vegetarian", "Vegetarian"),
    ("vegan", "Vegan"),
    ("dessert", "Dessert"),
    ("breakfast", "Breakfast"),
    ("lunch", "Lunch"),
    ("dinner", "Dinner"),
    ("snack", "Snack"),
    ("drink", "Drink"),
    ("side", "Side"),
];

const FR_TAGS: &[(&str, &str)] = &[
    ("asian", "Asiatique"),
    ("european", "Européen"),
    ("american", "Américain"),
    ("mediterranean", "Méditerranéen"),
    ("vegetarian", "Végétarien"),
    ("vegan", "Végane"),
    ("breakfast", "Petit-déjeuner"),
    ("drink", "Boisson"),
    ("side", "Accompagnement"),
];

const ES_TAGS: &[(&str, &str)] = &[
    ("asian", "Asiática"),
    ("european", "Europea"),
    ("american", "Estadounidense"),
    ("mediterranean", "Mediterránea"),
    ("vegetarian", "Vegetariana"),
    ("vegan", "Vegana"),
    ("breakfast", "Desayuno"),
    ("lunch", "Almuerzo"),
    ("dinner", "Cena"),
    ("snack", "Tentempié"),
    ("drink", "Bebida"),
    ("side", "Guarnición"),
];

const NL_TAGS: &[(&str, &str)] = &[
    ("asian", "Aziatisch"),
    ("european", "Europees"),
    ("american", "Amerikaans"),
    ("mediterranean", "Mediterrane"),
    ("vegetarian", "Vegetarisch"),
    ("vegan", "Veganistisch"),
    ("dessert", "Nagerecht"),
    ("breakfast", "Ontbijt"),
    ("dinner", "Diner"),
    ("drink", "Drank"),
    ("side", "Bijgerecht"),
];
