/// End-to-end tests for macro scripts driving the client `spells` library
/// against the reference character host.
use scripting::{ScriptConfig, ScriptEngine, ScriptRealm};
use spellbook::formula::{failure_rate_to_int, hunger_bars, power_to_barcount};
use spellbook::{spell_by_name, Character, God, SpellHost};

const CHARACTER: &str = r#"{
    "name": "Ozzy",
    "intelligence": 16,
    "skills": { "spellcasting": 8, "conjuration": 6, "ice": 9 },
    "armour_penalty": 5,
    "religion": "vehumet",
    "memorised": ["Magic Dart", "Freeze", "Ozocubu's Refrigeration", "Bolt of Cold"]
}"#;

fn character() -> Character {
    Character::from_json(CHARACTER, 7).unwrap()
}

fn engine() -> ScriptEngine {
    let mut engine = ScriptEngine::new(ScriptConfig::default(), ScriptRealm::Client).unwrap();
    engine.attach_host(character());
    engine
}

#[test]
fn numeric_queries_match_the_host() {
    let engine = engine();
    let host = character();

    for name in ["Magic Dart", "Freeze", "Bolt of Cold", "Flame Tongue", "Shatter", "Blink"] {
        let spell = spell_by_name(name);
        let script = format!(
            r#"local n = "{}"
            return spells.level(n), spells.mana_cost(n), spells.range(n),
                   spells.max_range(n), spells.min_range(n), spells.fail(n),
                   spells.fail_severity(n), spells.hunger(n), spells.power(n),
                   spells.max_power(n)"#,
            name
        );
        let got: (i32, i32, i32, i32, i32, i32, i32, i32, i32, i32) = engine.eval(&script).unwrap();

        let power = host.calc_spell_power(spell, true);
        let cap = host.spell_power_cap(spell);
        let expected = (
            host.spell_difficulty(spell),
            host.spell_mana(spell),
            host.spell_range(spell, power),
            host.spell_range(spell, cap),
            host.spell_range(spell, 0),
            failure_rate_to_int(host.spell_fail(spell)),
            host.fail_severity(spell),
            hunger_bars(host.spell_hunger(spell)),
            power_to_barcount(power),
            power_to_barcount(cap),
        );
        assert_eq!(got, expected, "mismatch for {}", name);
    }
}

#[test]
fn boolean_queries_match_the_host() {
    let engine = engine();
    let host = character();

    for name in ["Magic Dart", "Fireball", "Conjure Flame", "Passwall", "Apportation", "Pain"] {
        let spell = spell_by_name(name);
        let script = format!(
            r#"local n = "{}"
            return spells.memorised(n), spells.god_likes(n), spells.god_hates(n, "Zin"),
                   spells.god_loathes(n, "Trog")"#,
            name
        );
        let got: (bool, bool, bool, bool) = engine.eval(&script).unwrap();
        let expected = (
            host.is_memorised(spell),
            host.god_likes_spell(spell, God::Vehumet),
            host.god_hates_spell(spell, God::Zin),
            host.god_loathes_spell(spell, God::Trog),
        );
        assert_eq!(got, expected, "mismatch for {}", name);
    }
}

#[test]
fn names_are_format_insensitive() {
    let engine = engine();
    let level: i32 = engine
        .eval(r#"return spells.level("OZOCUBUS_REFRIGERATION")"#)
        .unwrap();
    assert_eq!(level, 6);
    let known: bool = engine
        .eval(r#"return spells.memorised("ozocubu's refrigeration")"#)
        .unwrap();
    assert!(known);
}

#[test]
fn unknown_names_propagate_as_defaults() {
    let engine = engine();
    let (level, fail, power, likes): (i32, i32, i32, bool) = engine
        .eval(
            r#"local n = "Nonexistent Spell"
            return spells.level(n), spells.fail(n), spells.power(n), spells.god_likes(n)"#,
        )
        .unwrap();
    assert_eq!((level, fail, power, likes), (0, 0, 1, false));

    // Unknown god: no reactions at all.
    let hates: bool = engine
        .eval(r#"return spells.god_hates("Pain", "Nonexistent God")"#)
        .unwrap();
    assert!(!hates);
}

#[test]
fn macro_hooks_use_spell_queries() {
    let mut engine = engine();
    engine
        .load_script(
            "picker",
            r#"
            chosen = {}
            hooks.on_turn(function(turn)
                for _, name in ipairs({ "Bolt of Cold", "Magic Dart" }) do
                    if spells.memorised(name) and spells.dir_or_target(name)
                        and spells.god_likes(name) then
                        chosen[turn] = name
                        return
                    end
                end
            end)
        "#,
        )
        .unwrap();

    for turn in 1..=3 {
        let metrics = engine.run_on_turn(turn).unwrap();
        assert_eq!(metrics.errors, 0);
    }
    let picked: String = engine.eval("return chosen[2]").unwrap();
    assert_eq!(picked, "Bolt of Cold");
}

#[test]
fn type_errors_abort_the_script() {
    let mut engine = engine();
    let err = engine
        .load_script("bad", "local x = spells.fail(nil)")
        .unwrap_err();
    assert!(err.to_string().starts_with("script load error: bad:"));
}
