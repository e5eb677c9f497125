use chrono::Datelike;
use clap::{Parser, Subcommand};
use simple_recipes::checklist::{self, Checklist, ChecklistKind};
use simple_recipes::filter::{self, FilterState, SortKey};
use simple_recipes::i18n::Locale;
use simple_recipes::recipe::RecipeRecord;
use simple_recipes::render::{self, RecipeDetail};
use simple_recipes::sections::{FragmentUpdate, Section, SectionController, SectionEvent};
use simple_recipes::store::FileStore;
use simple_recipes::theme::{self, Theme};
use simple_recipes::types::Difficulty;
use simple_recipes::{collection, config, logging, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-recipes")]
#[command(about = "Multilingual recipe collection: search, tabs and checklists")]
#[command(long_about = "\
Multilingual recipe collection: search, tabs and checklists

Your filesystem is the data source. Every .toml file under a locale directory
is one recipe; the file name is its slug.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── en/                          # Locale directory
  │   ├── pasta-al-limone.toml     # Recipe, slug \"pasta-al-limone\"
  │   └── mains/
  │       └── lentil-soup.toml     # Nesting is allowed; slug is the stem
  └── fr/
      └── pates-au-citron.toml     # translation_key links it to its siblings

Checklist state and the theme preference live in a JSON file (storage.path in
config.toml, or --state).

Run 'simple-recipes gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Checklist state file (overrides storage.path)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Shared flag for commands that read one locale's collection.
#[derive(clap::Args, Clone)]
struct LocaleArgs {
    /// Locale code (defaults to the site's default locale)
    #[arg(long)]
    locale: Option<Locale>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the content directory and print its inventory
    Check,
    /// Search, filter and sort one locale's recipes
    List {
        #[command(flatten)]
        locale: LocaleArgs,
        /// Match against titles and translated tag labels
        #[arg(long, short)]
        query: Option<String>,
        /// Keep recipes carrying any of these tags
        #[arg(long = "tag", short)]
        tags: Vec<String>,
        /// Keep recipes with any of these difficulties
        #[arg(long = "difficulty", short)]
        difficulties: Vec<Difficulty>,
        /// newest, oldest, fastest or longest
        #[arg(long, short)]
        sort: Option<SortKey>,
        /// Print the result as JSON summaries
        #[arg(long, conflicts_with = "html")]
        json: bool,
        /// Print the result as an HTML card grid
        #[arg(long)]
        html: bool,
    },
    /// Show a recipe's sections and checklist state
    Show {
        slug: String,
        #[command(flatten)]
        locale: LocaleArgs,
        /// URL fragment present at load time
        #[arg(long, default_value = "")]
        fragment: String,
        /// Select this section after loading
        #[arg(long)]
        select: Option<Section>,
        /// Print the tabs as HTML
        #[arg(long)]
        html: bool,
    },
    /// Check or uncheck one checklist item
    Tick {
        slug: String,
        kind: ChecklistKind,
        /// G:I for ingredients, N for steps (as shown by `show`)
        item: String,
        #[command(flatten)]
        locale: LocaleArgs,
        #[arg(long)]
        uncheck: bool,
    },
    /// Clear a recipe's checklist
    Reset {
        slug: String,
        kind: ChecklistKind,
        #[command(flatten)]
        locale: LocaleArgs,
    },
    /// Print the home page selections
    Home {
        #[command(flatten)]
        locale: LocaleArgs,
        /// Month (1-12) for seasonal picks, defaults to the current month
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Show or change the light/dark theme preference
    Theme {
        /// Save this theme (light or dark)
        #[arg(conflicts_with = "toggle")]
        theme: Option<Theme>,
        /// Save the opposite of the current theme
        #[arg(long)]
        toggle: bool,
        /// Assume the system asks for dark mode
        #[arg(long)]
        prefers_dark: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {e}");
    }

    match &cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::List {
            locale,
            query,
            tags,
            difficulties,
            sort,
            json,
            html,
        } => {
            let manifest = scan::scan(&cli.source)?;
            let locale = manifest.config.resolve_locale(locale.locale)?;
            let t = manifest.config.translator(locale);
            let summaries = manifest.summaries(locale);
            let state = FilterState {
                query: query.clone().unwrap_or_default(),
                active_tags: tags.iter().cloned().collect(),
                active_difficulties: difficulties.iter().copied().collect(),
                sort: sort.unwrap_or(manifest.config.listing.default_sort),
            };
            let items = filter::filter_and_sort(&summaries, &state, |tag| t.tag_label_or_slug(tag));
            let all_tags = filter::all_tags(&summaries, |tag| t.tag_label_or_slug(tag));

            if *json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if *html {
                let store = FileStore::open(state_path(&cli, &manifest));
                let (theme, _) = theme::resolve_theme(&store, false);
                let content = maud::html! {
                    (render::render_tag_filter(&all_tags, &state, &t))
                    (render::render_grid(&items, &t, manifest.config.default_locale))
                };
                let page = render::render_page(&t.t("nav.recipes"), locale, theme, content);
                println!("{}", page.into_string());
            } else {
                output::print_recipe_list(&items, &all_tags, &state, &t);
            }
        }
        Command::Show {
            slug,
            locale,
            fragment,
            select,
            html,
        } => {
            let manifest = scan::scan(&cli.source)?;
            let locale = manifest.config.resolve_locale(locale.locale)?;
            let t = manifest.config.translator(locale);
            let record = find_record(&manifest, locale, slug)?;

            let mut sections = SectionController::for_recipe(record, fragment);
            let mut update = sections.sync_fragment();
            if let Some(section) = select {
                let transition = sections.apply(SectionEvent::Select(*section));
                if transition.fragment != FragmentUpdate::Unchanged {
                    update = transition.fragment;
                }
            }

            let store = FileStore::open(state_path(&cli, &manifest));
            let key = record.checklist_key();
            let ingredients = checklist::namespace(ChecklistKind::Ingredients, &key)
                .map(|ns| checklist::load_all(&store, &ns))
                .unwrap_or_default();
            let steps = checklist::namespace(ChecklistKind::Steps, &key)
                .map(|ns| checklist::load_all(&store, &ns))
                .unwrap_or_default();
            let languages = render::language_links(&manifest, record, sections.active());

            let detail = RecipeDetail {
                record,
                sections: &sections,
                fragment: &update,
                ingredients: &ingredients,
                steps: &steps,
                languages: &languages,
            };
            if *html {
                let tabs = render::render_sections(&detail, &t);
                let (theme, _) = theme::resolve_theme(&store, false);
                let page = render::render_page(record.display_title(), locale, theme, tabs);
                println!("{}", page.into_string());
            } else {
                output::print_recipe_detail(&detail, &t);
            }
        }
        Command::Tick {
            slug,
            kind,
            item,
            locale,
            uncheck,
        } => {
            let manifest = scan::scan(&cli.source)?;
            let locale = manifest.config.resolve_locale(locale.locale)?;
            let record = find_record(&manifest, locale, slug)?;
            let item_id = resolve_item_id(record, *kind, item)?;

            let mut store = FileStore::open(state_path(&cli, &manifest));
            let mut list = Checklist::open(&mut store, *kind, &record.checklist_key());
            list.toggle(&item_id, !*uncheck);
            println!(
                "{}",
                output::format_checklist_change(list.namespace(), &item_id, !*uncheck)
            );
        }
        Command::Reset { slug, kind, locale } => {
            let manifest = scan::scan(&cli.source)?;
            let locale = manifest.config.resolve_locale(locale.locale)?;
            let record = find_record(&manifest, locale, slug)?;

            let mut store = FileStore::open(state_path(&cli, &manifest));
            let mut list = Checklist::open(&mut store, *kind, &record.checklist_key());
            list.reset();
            println!("{}", output::format_checklist_reset(list.namespace()));
        }
        Command::Home { locale, month } => {
            let manifest = scan::scan(&cli.source)?;
            let locale = manifest.config.resolve_locale(locale.locale)?;
            let t = manifest.config.translator(locale);
            let summaries = manifest.summaries(locale);
            let month = month.unwrap_or_else(|| chrono::Local::now().month());
            let home = collection::select_home(&summaries, &manifest.config.listing, month);
            output::print_home(&home, &t);
        }
        Command::Theme {
            theme: choice,
            toggle,
            prefers_dark,
        } => {
            let manifest = scan::scan(&cli.source)?;
            let mut store = FileStore::open(state_path(&cli, &manifest));
            let (current, _) = theme::resolve_theme(&store, *prefers_dark);
            let next = if *toggle { Some(current.toggled()) } else { *choice };
            if let Some(next) = next {
                theme::save_theme(&mut store, next);
            }
            let (resolved, source) = theme::resolve_theme(&store, *prefers_dark);
            println!("{}", output::format_theme(resolved, source));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Checklist state file: `--state` wins over the configured path.
fn state_path(cli: &Cli, manifest: &scan::Manifest) -> PathBuf {
    cli.state
        .clone()
        .unwrap_or_else(|| manifest.config.storage_path(&cli.source))
}

fn find_record<'a>(
    manifest: &'a scan::Manifest,
    locale: Locale,
    slug: &str,
) -> Result<&'a RecipeRecord, Box<dyn std::error::Error>> {
    manifest
        .find(locale, slug)
        .ok_or_else(|| format!("no recipe '{slug}' in locale {locale}").into())
}

/// Map the CLI item argument to a checklist item id, checking it exists.
fn resolve_item_id(
    record: &RecipeRecord,
    kind: ChecklistKind,
    raw: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    match kind {
        ChecklistKind::Ingredients => {
            let (g, i) = raw
                .split_once(':')
                .and_then(|(g, i)| Some((g.parse::<usize>().ok()?, i.parse::<usize>().ok()?)))
                .ok_or_else(|| format!("ingredient item must be GROUP:INDEX, got '{raw}'"))?;
            let exists = record
                .ingredient_groups
                .get(g)
                .is_some_and(|group| i < group.ingredients.len());
            if !exists {
                return Err(format!("no ingredient {g}:{i} in '{}'", record.slug).into());
            }
            Ok(checklist::ingredient_item_id(&record.checklist_key(), g, i))
        }
        ChecklistKind::Steps => {
            let n: usize = raw
                .parse()
                .map_err(|_| format!("step item must be a number, got '{raw}'"))?;
            if n >= record.steps.len() {
                return Err(format!("no step {n} in '{}'", record.slug).into());
            }
            Ok(checklist::step_item_id(n))
        }
    }
}
