//! Interactive session: prompt for each reading, predict, render, repeat.
//! Entered values become the defaults for the next round.
//!
//! Answers come from a [`LineSource`]; prompts and notices go to their own writer so the
//! report stream stays clean for `--format json`.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::features::{Feature, FieldSpec, MachineType, SensorReadings, FIELD_SPECS};
use crate::pipeline::PredictionPipeline;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Where answers come from: a line editor on a terminal, or any buffered reader.
pub trait LineSource {
    /// Show `prompt` and read one line. `None` means the input ended.
    fn next_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Line source over a plain reader; prompts are echoed to `echo`.
pub struct BufferedLines<R, W> {
    input: R,
    echo: W,
}

impl<R: BufRead, W: Write> BufferedLines<R, W> {
    pub fn new(input: R, echo: W) -> Self {
        Self { input, echo }
    }

    pub fn into_echo(self) -> W {
        self.echo
    }
}

impl<R: BufRead, W: Write> LineSource for BufferedLines<R, W> {
    fn next_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.echo, "{}", prompt)?;
        self.echo.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Ask until the answer parses. `None` means the input ended.
fn ask<T, L, N, F>(lines: &mut L, notices: &mut N, label: &str, default: T, parse: F) -> Result<Option<T>>
where
    T: Display,
    L: LineSource,
    N: Write,
    F: Fn(&str) -> std::result::Result<T, String>,
{
    let prompt = format!("{} [{}]: ", label, default);
    loop {
        let Some(line) = lines.next_line(&prompt)? else {
            return Ok(None);
        };
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(Some(default));
        }
        match parse(answer) {
            Ok(v) => return Ok(Some(v)),
            Err(msg) => writeln!(notices, "  {}", msg)?,
        }
    }
}

fn parse_field(spec: &FieldSpec, answer: &str) -> std::result::Result<f64, String> {
    let v: f64 = answer
        .parse()
        .map_err(|_| format!("'{}' is not a number", answer))?;
    spec.check(v).map_err(|e| e.to_string())?;
    Ok(v)
}

fn read_readings<L: LineSource, N: Write>(
    lines: &mut L,
    notices: &mut N,
    last: &SensorReadings,
) -> Result<Option<SensorReadings>> {
    let Some(machine_type) = ask(lines, notices, "Machine type (L/M/H)", last.machine_type, |s| {
        s.parse::<MachineType>()
    })?
    else {
        return Ok(None);
    };

    let mut values = [0.0f64; 5];
    for (slot, s) in values.iter_mut().zip(FIELD_SPECS.iter()) {
        let current = last.numeric(s.feature).unwrap_or(s.default);
        match ask(lines, notices, s.name, current, |a| parse_field(s, a))? {
            Some(v) => *slot = v,
            None => return Ok(None),
        }
    }
    let value = |f: Feature| {
        let idx = FIELD_SPECS.iter().position(|s| s.feature == f).unwrap_or(0);
        values[idx]
    };

    // integer fields were range and whole-number checked in parse_field
    Ok(Some(SensorReadings {
        machine_type,
        air_temperature: value(Feature::AirTemperature),
        process_temperature: value(Feature::ProcessTemperature),
        rotational_speed: value(Feature::RotationalSpeed) as u32,
        torque: value(Feature::Torque),
        tool_wear: value(Feature::ToolWear) as u32,
    }))
}

/// Run rounds until the user declines or input ends. Reports go to `output`, everything
/// else to `notices`. Returns the number of predictions made.
pub fn run_session<L, N, O>(
    pipeline: &PredictionPipeline,
    format: OutputFormat,
    lines: &mut L,
    notices: &mut N,
    output: &mut O,
) -> Result<usize>
where
    L: LineSource,
    N: Write,
    O: Write,
{
    let mut last = SensorReadings::default();
    let mut rounds = 0;
    writeln!(notices, "Enter sensor readings (press Enter to keep the value in brackets).")?;
    loop {
        let Some(readings) = read_readings(lines, notices, &last)? else {
            break;
        };
        match pipeline.run(&readings) {
            Ok(report) => {
                if format == OutputFormat::Text {
                    writeln!(output)?;
                }
                report.render(format, output)?;
                output.flush()?;
                rounds += 1;
                last = readings;
            }
            Err(e) => {
                warn!(error = %e, "rejected readings");
                writeln!(notices, "Rejected: {}", e)?;
            }
        }
        let again = ask(lines, notices, "Predict again? (y/n)", 'y', |s| {
            match s.to_ascii_lowercase().as_str() {
                "y" | "yes" => Ok('y'),
                "n" | "no" => Ok('n'),
                _ => Err("answer y or n".to_string()),
            }
        })?;
        if again != Some('y') {
            break;
        }
    }
    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(feature: Feature) -> &'static FieldSpec {
        FIELD_SPECS.iter().find(|s| s.feature == feature).unwrap()
    }

    #[test]
    fn reprompts_until_valid() {
        let mut lines = BufferedLines::new("abc\n9999\n512.5\n".as_bytes(), Vec::new());
        let mut notices = Vec::new();
        let v = ask(&mut lines, &mut notices, spec(Feature::AirTemperature).name, 295.0, |a| {
            parse_field(spec(Feature::AirTemperature), a)
        })
        .unwrap();
        assert_eq!(v, Some(512.5));
        let text = String::from_utf8(notices).unwrap();
        assert!(text.contains("'abc' is not a number"));
        assert!(text.contains("outside [150, 600]"));

        let echoed = String::from_utf8(lines.into_echo()).unwrap();
        assert_eq!(echoed.matches("air temperature [K] [295]: ").count(), 3);
    }

    #[test]
    fn empty_answer_keeps_default_and_eof_ends() {
        let mut lines = BufferedLines::new("\n".as_bytes(), io::sink());
        let mut notices = Vec::new();
        assert_eq!(ask(&mut lines, &mut notices, "x", 7, |_| Ok(1)).unwrap(), Some(7));
        assert_eq!(ask(&mut lines, &mut notices, "x", 7, |_| Ok(1)).unwrap(), None);
    }

    /// Answers from a fixed list, recording each prompt.
    struct Scripted {
        answers: std::vec::IntoIter<&'static str>,
        prompts: Vec<String>,
    }

    impl LineSource for Scripted {
        fn next_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.answers.next().map(str::to_string))
        }
    }

    #[test]
    fn reads_full_row() {
        let mut lines = Scripted {
            answers: vec!["h", "300", "310", "1500", "60.5", "200"].into_iter(),
            prompts: Vec::new(),
        };
        let r = read_readings(&mut lines, &mut io::sink(), &SensorReadings::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            r,
            SensorReadings {
                machine_type: MachineType::H,
                air_temperature: 300.0,
                process_temperature: 310.0,
                rotational_speed: 1500,
                torque: 60.5,
                tool_wear: 200,
            }
        );
        assert_eq!(lines.prompts.len(), 6);
        assert_eq!(lines.prompts[0], "Machine type (L/M/H) [L]: ");
    }
}
