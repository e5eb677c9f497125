//! End-to-end tests driving the `simple-recipes` binary over a copy of
//! `fixtures/content/`.
//!
//! Each test gets its own temp directory, so checklist state written by one
//! test never leaks into another.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn recipes(content: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simple-recipes");
    cmd.env_remove("RUST_LOG")
        .arg("--source")
        .arg(content.path());
    cmd
}

// =========================================================================
// check / gen-config
// =========================================================================

#[test]
fn check_prints_inventory() {
    let content = setup_content();
    recipes(&content)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("en (5 recipes)"))
        .stdout(predicate::str::contains("fr (2 recipes)"))
        .stdout(predicate::str::contains("Source: en/mains/lentil-soup.toml"))
        .stdout(predicate::str::contains("==> Content is valid"));
}

#[test]
fn check_rejects_broken_record() {
    let content = setup_content();
    std::fs::write(content.path().join("en/broken.toml"), "title = [").unwrap();
    recipes(&content)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.toml"));
}

#[test]
fn gen_config_prints_stock_file() {
    let content = setup_content();
    recipes(&content)
        .arg("gen-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[listing]"))
        .stdout(predicate::str::contains("[storage]"));
}

// =========================================================================
// list
// =========================================================================

#[test]
fn list_defaults_to_newest_first() {
    let content = setup_content();
    let out = recipes(&content).arg("list").assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "5 recipes · Newest");
    assert_eq!(lines[1], "001 Lentil soup");
    let last = lines.iter().rev().find(|l| l.starts_with("005")).unwrap();
    assert_eq!(*last, "005 Summer salad");
}

#[test]
fn list_filters_by_tag() {
    let content = setup_content();
    recipes(&content)
        .args(["list", "--tag", "vegan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 recipes · Newest"))
        .stdout(predicate::str::contains("001 Lentil soup"))
        .stdout(predicate::str::contains("002 Summer salad"));
}

#[test]
fn list_sorts_fastest_with_unknown_time_last() {
    let content = setup_content();
    let out = recipes(&content)
        .args(["list", "--sort", "fastest"])
        .assert()
        .success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
    let titles: Vec<&str> = stdout
        .lines()
        .filter(|l| l.starts_with('0'))
        .map(|l| &l[4..])
        .collect();
    assert_eq!(
        titles,
        vec![
            "Summer salad",
            "Banana pancakes",
            "Pasta al limone",
            "Chocolate mousse",
            "Lentil soup",
        ]
    );
}

#[test]
fn list_without_matches_offers_reset() {
    let content = setup_content();
    recipes(&content)
        .args(["list", "--query", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes match your filters."))
        .stdout(predicate::str::contains("Reset filters"));
}

#[test]
fn list_json_for_other_locale() {
    let content = setup_content();
    let out = recipes(&content)
        .args(["list", "--locale", "fr", "--json"])
        .assert()
        .success();
    let items: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    let slugs: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["soupe-de-lentilles", "pates-au-citron"]);
}

#[test]
fn list_html_links_cards_under_locale_prefix() {
    let content = setup_content();
    recipes(&content)
        .args(["list", "--locale", "fr", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<html lang="fr""#))
        .stdout(predicate::str::contains(r#"href="/fr/pates-au-citron""#));
}

#[test]
fn list_rejects_disabled_locale() {
    let content = setup_content();
    recipes(&content)
        .args(["list", "--locale", "es"])
        .assert()
        .failure();
}

// =========================================================================
// show
// =========================================================================

#[test]
fn show_without_fragment_rewrites_it() {
    let content = setup_content();
    recipes(&content)
        .args(["show", "pasta-al-limone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sections: [Ingredients] Steps\n"))
        .stdout(predicate::str::contains("Fragment: #ingredients (replace)"))
        .stdout(predicate::str::contains("    [ ] 200 g spaghetti (0:0)"));
}

#[test]
fn show_honors_valid_fragment() {
    let content = setup_content();
    recipes(&content)
        .args(["show", "pasta-al-limone", "--fragment", "#steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sections: Ingredients [Steps]"))
        .stdout(predicate::str::contains("Fragment: #steps\n"))
        .stdout(predicate::str::contains("    [ ] 1. Boil the spaghetti in salted water. (0)"));
}

#[test]
fn show_falls_back_when_section_is_unavailable() {
    let content = setup_content();
    recipes(&content)
        .args(["show", "pasta-al-limone", "--fragment", "#notes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sections: [Ingredients] Steps"))
        .stdout(predicate::str::contains("Fragment: #ingredients (replace)"));
}

#[test]
fn show_select_reports_replace() {
    let content = setup_content();
    recipes(&content)
        .args([
            "show",
            "lentil-soup",
            "--fragment",
            "#ingredients",
            "--select",
            "nutritional-values",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Sections: Ingredients Steps Notes [Nutritional Values]",
        ))
        .stdout(predicate::str::contains("Fragment: #nutritional-values (replace)"))
        .stdout(predicate::str::contains("    Calories: 320"));
}

#[test]
fn show_html_marks_active_tab() {
    let content = setup_content();
    recipes(&content)
        .args(["show", "lentil-soup", "--fragment", "notes", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r##"href="#notes" role="tab" aria-selected="true""##));
}

#[test]
fn show_unknown_slug_fails() {
    let content = setup_content();
    recipes(&content)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no recipe 'nope'"));
}

// =========================================================================
// tick / reset
// =========================================================================

#[test]
fn tick_persists_across_runs() {
    let content = setup_content();
    let state = content.path().join("state/checklists.json");

    recipes(&content)
        .args(["tick", "pasta-al-limone", "ingredients", "1:0", "--state"])
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Checked en/pasta-al-limone:1:0 in ing:en/pasta-al-limone",
        ));
    assert!(state.exists());

    recipes(&content)
        .args(["show", "pasta-al-limone", "--state"])
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains("    [x] Parmesan (1:0)"))
        .stdout(predicate::str::contains("    [ ] Black pepper (1:1)"));
}

#[test]
fn tick_uses_configured_storage_path() {
    let content = setup_content();
    recipes(&content)
        .args(["tick", "pasta-al-limone", "steps", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked 2 in steps:en/pasta-al-limone"));
    assert!(content.path().join(".simple-recipes/checklists.json").exists());

    // The state directory is hidden and never scanned as content.
    recipes(&content).arg("check").assert().success();
}

#[test]
fn uncheck_and_reset() {
    let content = setup_content();
    for args in [
        ["tick", "lentil-soup", "steps", "0"],
        ["tick", "lentil-soup", "steps", "1"],
    ] {
        recipes(&content).args(args).assert().success();
    }

    recipes(&content)
        .args(["tick", "lentil-soup", "steps", "0", "--uncheck"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unchecked 0 in steps:en/lentil-soup"));
    recipes(&content)
        .args(["show", "lentil-soup", "--fragment", "steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("    [ ] 1. Sweat the onions. (0)"))
        .stdout(predicate::str::contains("    [x] 2. Add lentils and stock. (1)"));

    recipes(&content)
        .args(["reset", "lentil-soup", "steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset steps:en/lentil-soup"));
    recipes(&content)
        .args(["show", "lentil-soup", "--fragment", "steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("    [ ] 2. Add lentils and stock. (1)"));
}

#[test]
fn tick_rejects_out_of_range_items() {
    let content = setup_content();
    recipes(&content)
        .args(["tick", "pasta-al-limone", "steps", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no step 9"));
    recipes(&content)
        .args(["tick", "pasta-al-limone", "ingredients", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GROUP:INDEX"));
}

#[test]
fn corrupt_state_file_reads_as_empty() {
    let content = setup_content();
    let state = content.path().join("checklists.json");
    std::fs::write(&state, "{not json").unwrap();
    recipes(&content)
        .args(["show", "pasta-al-limone", "--state"])
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains("    [ ] Parmesan (1:0)"));
}

// =========================================================================
// home
// =========================================================================

#[test]
fn home_rows_for_february() {
    let content = setup_content();
    recipes(&content)
        .args(["home", "--month", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Featured\n    Banana pancakes"))
        .stdout(predicate::str::contains("In season (winter)"))
        .stdout(predicate::str::contains("Dinner (2)"));
}

#[test]
fn home_rejects_bad_month() {
    let content = setup_content();
    recipes(&content)
        .args(["home", "--month", "13"])
        .assert()
        .failure();
}

#[test]
fn same_slug_in_two_locales_has_separate_checklists() {
    let content = setup_content();
    std::fs::write(
        content.path().join("en/tart.toml"),
        "title = \"Tart\"\nsteps = [\"Bake.\"]\n\n[[ingredient_groups]]\ningredients = [\"Sugar\"]\n",
    )
    .unwrap();
    std::fs::write(
        content.path().join("fr/tart.toml"),
        "title = \"Tarte\"\nsteps = [\"Cuire.\"]\n\n[[ingredient_groups]]\ningredients = [\"Sucre\"]\n",
    )
    .unwrap();

    recipes(&content)
        .args(["tick", "tart", "ingredients", "0:0", "--locale", "en"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in ing:en/tart"));
    recipes(&content)
        .args(["tick", "tart", "steps", "0", "--locale", "fr"])
        .assert()
        .success();

    recipes(&content)
        .args(["show", "tart", "--locale", "fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("    [ ] Sucre (0:0)"));

    recipes(&content)
        .args(["reset", "tart", "steps", "--locale", "en"])
        .assert()
        .success();
    recipes(&content)
        .args(["show", "tart", "--locale", "fr", "--fragment", "steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("    [x] 1. Cuire. (0)"));
    recipes(&content)
        .args(["show", "tart", "--locale", "en"])
        .assert()
        .success()
        .stdout(predicate::str::contains("    [x] Sugar (0:0)"));
}

// =========================================================================
// languages / tags / theme
// =========================================================================

#[test]
fn show_lists_translations_keeping_section() {
    let content = setup_content();
    recipes(&content)
        .args(["show", "pasta-al-limone", "--fragment", "#steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Languages:\n    [English] /pasta-al-limone#steps\n    Français /fr/pates-au-citron#steps\n",
        ));
    recipes(&content)
        .args(["show", "pates-au-citron", "--locale", "fr", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r##"<a href="/pasta-al-limone#ingredients" hreflang="en" lang="en">English</a>"##,
        ));
}

#[test]
fn show_without_translation_has_no_language_menu() {
    let content = setup_content();
    recipes(&content)
        .args(["show", "summer-salad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Languages:").not());
}

#[test]
fn list_prints_tag_universe() {
    let content = setup_content();
    let out = recipes(&content)
        .args(["list", "--tag", "vegan"])
        .assert()
        .success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
    let tags = stdout.lines().last().unwrap();
    assert!(tags.starts_with("Tags: "), "{tags}");
    assert!(tags.contains("Breakfast"));
    assert!(tags.contains("[Vegan]"));
}

#[test]
fn list_html_has_tag_filter() {
    let content = setup_content();
    recipes(&content)
        .args(["list", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<div class="tag-filter">"#))
        .stdout(predicate::str::contains(r#"data-tag="dessert""#));
}

#[test]
fn list_on_tagless_collection_says_so() {
    let content = setup_content();
    for entry in std::fs::read_dir(content.path().join("fr")).unwrap() {
        std::fs::remove_file(entry.unwrap().path()).unwrap();
    }
    std::fs::write(content.path().join("fr/pain.toml"), "title = \"Pain\"\n").unwrap();
    recipes(&content)
        .args(["list", "--locale", "fr", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pas encore d'étiquettes").or(
            predicate::str::contains("Pas encore d&#39;étiquettes"),
        ));
}

#[test]
fn theme_saves_and_toggles() {
    let content = setup_content();
    recipes(&content)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light (default)"));
    recipes(&content)
        .args(["theme", "--prefers-dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark (system)"));
    recipes(&content)
        .args(["theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark (saved)"));
    recipes(&content)
        .args(["show", "pasta-al-limone", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<html class="dark" lang="en""#));
    recipes(&content)
        .args(["theme", "--toggle", "--prefers-dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light (saved)"));
}
