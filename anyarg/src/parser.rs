//! The argv tokenizer.
//!
//! Short options follow POSIX conventions (`-a`, `-abc` bundles, `-ofoo`,
//! `-o foo`), long options follow GNU conventions (`--name`, `--name=value`,
//! `--name value`). `--` ends option parsing and a lone `-` is an ordinary
//! argument.
//!
//! [`tokenize`] only reads the registry. The values it resolves come back in
//! a [`Resolution`] so a failed pass leaves every option untouched.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::option::{OptionKey, OptionKind, OptionValue};
use crate::registry::{OptionId, OptionRegistry};

/// Outcome of one successful pass over argv.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub program: String,
    /// Values in command-line order; later entries win.
    pub assignments: Vec<(OptionId, OptionValue)>,
    pub positionals: Vec<String>,
}

struct Tokenizer<'r> {
    registry: &'r OptionRegistry,
    out: Resolution,
}

impl<'r> Tokenizer<'r> {
    fn assign(&mut self, id: OptionId, key: &OptionKey, text: &str) -> Result<()> {
        let kind = self.registry.get(id).kind();
        let value = OptionValue::coerce(kind, text, key)?;
        trace!(option = %key, value = %value, "assign");
        self.out.assignments.push((id, value));
        Ok(())
    }

    fn positional(&mut self, arg: &str) {
        trace!(arg, "positional");
        self.out.positionals.push(arg.to_string());
    }

    /// `--name` or `--name=value`; `rest` has the dashes stripped.
    ///
    /// Returns how many following tokens were consumed as a value.
    fn long(&mut self, rest: &str, next: Option<&str>) -> Result<usize> {
        if let Some((name, value)) = rest.split_once('=') {
            let key = OptionKey::Long(name.to_string());
            let id = self
                .registry
                .by_name(name)
                .ok_or_else(|| Error::UnknownOption(key.clone()))?;
            if !self.registry.get(id).kind().takes_value() {
                return Err(Error::UnwantedValue(name.to_string()));
            }
            if value.is_empty() {
                return Err(Error::MissingValue(key));
            }
            self.assign(id, &key, value)?;
            return Ok(0);
        }

        let key = OptionKey::Long(rest.to_string());
        let id = self
            .registry
            .by_name(rest)
            .ok_or_else(|| Error::UnknownOption(key.clone()))?;
        self.option_or_value(id, &key, next)
    }

    /// `-x`, `-xvalue` or a bundle of flags such as `-alv`.
    fn short(&mut self, rest: &str, next: Option<&str>) -> Result<usize> {
        let mut chars = rest.chars();
        let Some(first) = chars.next() else {
            return Ok(0);
        };
        let attached = chars.as_str();

        let key = OptionKey::Short(first);
        let id = self
            .registry
            .by_letter(first)
            .ok_or_else(|| Error::UnknownOption(key.clone()))?;

        if attached.is_empty() {
            return self.option_or_value(id, &key, next);
        }

        if self.registry.get(id).kind().takes_value() {
            self.assign(id, &key, attached)?;
            return Ok(0);
        }

        for c in rest.chars() {
            let key = OptionKey::Short(c);
            let id = self
                .registry
                .by_letter(c)
                .ok_or_else(|| Error::UnknownOption(key.clone()))?;
            if self.registry.get(id).kind() != OptionKind::Flag {
                return Err(Error::NotAFlag(c));
            }
            self.assign(id, &key, "true")?;
        }
        Ok(0)
    }

    /// A flag is switched on; anything else takes the next token.
    fn option_or_value(
        &mut self,
        id: OptionId,
        key: &OptionKey,
        next: Option<&str>,
    ) -> Result<usize> {
        if !self.registry.get(id).kind().takes_value() {
            self.assign(id, key, "true")?;
            return Ok(0);
        }
        let value = next.ok_or_else(|| Error::MissingValue(key.clone()))?;
        self.assign(id, key, value)?;
        Ok(1)
    }
}

/// Classify `argv` against `registry`. `argv[0]` is the program name.
///
/// Stops at the first malformed token.
pub fn tokenize<S: AsRef<str>>(registry: &OptionRegistry, argv: &[S]) -> Result<Resolution> {
    let (program, args) = argv.split_first().ok_or(Error::MissingProgramName)?;
    let program = program.as_ref();
    if program.starts_with('-') {
        return Err(Error::ProgramName(program.to_string()));
    }

    let mut tok = Tokenizer {
        registry,
        out: Resolution {
            program: program.to_string(),
            ..Resolution::default()
        },
    };

    let mut stop_parsing = false;
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_ref();
        let next = args.get(i + 1).map(|s| s.as_ref());
        i += 1;

        if stop_parsing || arg == "-" {
            tok.positional(arg);
            continue;
        }

        if arg == "--" {
            trace!("end of options");
            stop_parsing = true;
            continue;
        }

        if let Some(rest) = arg.strip_prefix("--") {
            i += tok.long(rest, next)?;
        } else if let Some(rest) = arg.strip_prefix('-') {
            i += tok.short(rest, next)?;
        } else {
            tok.positional(arg);
        }
    }

    debug!(
        program,
        assignments = tok.out.assignments.len(),
        positionals = tok.out.positionals.len(),
        "parsed command line"
    );
    Ok(tok.out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::Names;

    struct Fixture {
        reg: OptionRegistry,
        all: OptionId,
        verbose: OptionId,
        list: OptionId,
        input: OptionId,
        buffer: OptionId,
        min: OptionId,
    }

    fn fixture() -> Fixture {
        let mut reg = OptionRegistry::new();
        let all = reg.register(("all", 'a').into(), false.into(), "").unwrap();
        let list = reg.register('l'.into(), false.into(), "").unwrap();
        let verbose = reg.register('v'.into(), false.into(), "").unwrap();
        let input = reg
            .register(("input-file", 'i').into(), "-".into(), "=FILE")
            .unwrap();
        let buffer = reg
            .register(("buffer-size", 'b').into(), 100.into(), "=SIZE")
            .unwrap();
        let min = reg.register("min".into(), 0.9.into(), "=FLOAT").unwrap();
        Fixture {
            reg,
            all,
            verbose,
            list,
            input,
            buffer,
            min,
        }
    }

    fn run(f: &Fixture, argv: &[&str]) -> Result<Resolution> {
        let mut full = vec!["prog"];
        full.extend_from_slice(argv);
        tokenize(&f.reg, &full[..])
    }

    fn last(res: &Resolution, id: OptionId) -> Option<&OptionValue> {
        res.assignments
            .iter()
            .rev()
            .find(|(i, _)| *i == id)
            .map(|(_, v)| v)
    }

    #[test]
    fn short_and_long_forms_agree() {
        let f = fixture();
        for argv in [
            &["-b", "100"][..],
            &["-b100"][..],
            &["--buffer-size=100"][..],
            &["--buffer-size", "100"][..],
        ] {
            let res = run(&f, argv).unwrap();
            assert_eq!(last(&res, f.buffer), Some(&OptionValue::Int(100)), "{:?}", argv);
            assert!(res.positionals.is_empty());
        }
    }

    #[test]
    fn positionals_keep_their_order() {
        let f = fixture();
        let res = run(&f, &["-a", "x", "-b", "5", "y"]).unwrap();
        assert_eq!(res.positionals, vec!["x", "y"]);
        assert_eq!(last(&res, f.all), Some(&OptionValue::Flag(true)));
        assert_eq!(last(&res, f.buffer), Some(&OptionValue::Int(5)));
    }

    #[test]
    fn double_dash_stops_option_parsing() {
        let f = fixture();
        let res = run(&f, &["-a", "--", "-b", "z"]).unwrap();
        assert_eq!(res.positionals, vec!["-b", "z"]);
        assert_eq!(last(&res, f.all), Some(&OptionValue::Flag(true)));
        assert_eq!(last(&res, f.buffer), None);

        let res = run(&f, &["--", "--", "-"]).unwrap();
        assert_eq!(res.positionals, vec!["--", "-"]);
    }

    #[test]
    fn lone_dash_is_positional() {
        let f = fixture();
        let res = run(&f, &["-a", "-"]).unwrap();
        assert_eq!(res.positionals, vec!["-"]);
    }

    #[test]
    fn flags_bundle() {
        let f = fixture();
        let res = run(&f, &["-alv"]).unwrap();
        for id in [f.all, f.list, f.verbose] {
            assert_eq!(last(&res, id), Some(&OptionValue::Flag(true)));
        }
    }

    #[test]
    fn value_letter_in_bundle_fails() {
        let f = fixture();
        assert_eq!(run(&f, &["-alb"]).unwrap_err(), Error::NotAFlag('b'));
        assert_eq!(
            run(&f, &["-alq"]).unwrap_err(),
            Error::UnknownOption(OptionKey::Short('q'))
        );
    }

    #[test]
    fn value_letter_takes_the_rest_verbatim() {
        let f = fixture();
        // 'a' and 'v' are flags, but after a value option they are its text
        let res = run(&f, &["-iav"]).unwrap();
        assert_eq!(last(&res, f.input), Some(&OptionValue::Str("av".into())));
        assert_eq!(last(&res, f.all), None);

        let res = run(&f, &["-i-x=y"]).unwrap();
        assert_eq!(last(&res, f.input), Some(&OptionValue::Str("-x=y".into())));
    }

    #[test]
    fn value_token_may_look_like_an_option() {
        let f = fixture();
        let res = run(&f, &["-i", "--all", "--input-file", "-"]).unwrap();
        assert_eq!(last(&res, f.input), Some(&OptionValue::Str("-".into())));
        assert_eq!(last(&res, f.all), None);
        assert!(res.positionals.is_empty());
    }

    #[test]
    fn last_occurrence_wins() {
        let f = fixture();
        let res = run(&f, &["-b", "1", "--buffer-size=2", "-b3"]).unwrap();
        assert_eq!(last(&res, f.buffer), Some(&OptionValue::Int(3)));
        assert_eq!(res.assignments.len(), 3);
    }

    #[test]
    fn long_value_keeps_later_equals_signs() {
        let f = fixture();
        let res = run(&f, &["--input-file=a=b"]).unwrap();
        assert_eq!(last(&res, f.input), Some(&OptionValue::Str("a=b".into())));
    }

    #[test]
    fn numbers_are_best_effort() {
        let f = fixture();
        let res = run(&f, &["--min", "abc", "-b", "12kb"]).unwrap();
        assert_eq!(last(&res, f.min), Some(&OptionValue::Float(0.0)));
        assert_eq!(last(&res, f.buffer), Some(&OptionValue::Int(12)));
    }

    #[test]
    fn missing_values() {
        let f = fixture();
        let missing = Error::MissingValue(OptionKey::Long("buffer-size".into()));
        assert_eq!(run(&f, &["--buffer-size"]).unwrap_err(), missing);
        assert_eq!(run(&f, &["-a", "x", "--buffer-size"]).unwrap_err(), missing);
        assert_eq!(run(&f, &["--buffer-size="]).unwrap_err(), missing);
        assert_eq!(
            run(&f, &["-b"]).unwrap_err(),
            Error::MissingValue(OptionKey::Short('b'))
        );
    }

    #[test]
    fn empty_following_value_is_rejected() {
        let f = fixture();
        assert_eq!(
            run(&f, &["-i", ""]).unwrap_err(),
            Error::EmptyValue(OptionKey::Short('i'))
        );
    }

    #[test]
    fn flag_with_value_fails() {
        let f = fixture();
        assert_eq!(
            run(&f, &["--all=yes"]).unwrap_err(),
            Error::UnwantedValue("all".into())
        );
    }

    #[test]
    fn unknown_options_fail() {
        let f = fixture();
        assert_eq!(
            run(&f, &["--nope"]).unwrap_err(),
            Error::UnknownOption(OptionKey::Long("nope".into()))
        );
        assert_eq!(
            run(&f, &["--nope=1"]).unwrap_err(),
            Error::UnknownOption(OptionKey::Long("nope".into()))
        );
        assert_eq!(
            run(&f, &["-x"]).unwrap_err(),
            Error::UnknownOption(OptionKey::Short('x'))
        );
        // long names are not reachable through a single dash
        assert_eq!(
            run(&f, &["-min"]).unwrap_err(),
            Error::UnknownOption(OptionKey::Short('m'))
        );
    }

    #[test]
    fn first_error_stops_the_pass() {
        let f = fixture();
        let err = run(&f, &["-x", "--nope"]).unwrap_err();
        assert_eq!(err, Error::UnknownOption(OptionKey::Short('x')));
    }

    #[test]
    fn program_name_rules() {
        let f = fixture();
        let empty: [&str; 0] = [];
        assert_eq!(tokenize(&f.reg, &empty).unwrap_err(), Error::MissingProgramName);
        assert_eq!(
            tokenize(&f.reg, &["-prog"]).unwrap_err(),
            Error::ProgramName("-prog".into())
        );
        let res = tokenize(&f.reg, &["prog"]).unwrap();
        assert_eq!(res.program, "prog");
        assert!(res.assignments.is_empty() && res.positionals.is_empty());
    }

    #[test]
    fn empty_token_is_positional() {
        let f = fixture();
        let res = run(&f, &["", "x"]).unwrap();
        assert_eq!(res.positionals, vec!["", "x"]);
    }

    #[test]
    fn letters_are_chars_not_bytes() {
        let mut reg = OptionRegistry::new();
        let mu = reg.register(Names::from('µ'), false.into(), "").unwrap();
        let e = reg.register(Names::from('é'), "".into(), "").unwrap();
        let res = tokenize(&reg, &["prog", "-µ", "-éclair"]).unwrap();
        assert_eq!(res.assignments[0], (mu, OptionValue::Flag(true)));
        assert_eq!(res.assignments[1], (e, OptionValue::Str("clair".into())));
    }
}
