use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const ROWS: usize = 400;

const LANGUAGES: [(&str, f64); 8] = [
    ("JavaScript", 0.22),
    ("Python", 0.20),
    ("Java", 0.12),
    ("Go", 0.10),
    ("TypeScript", 0.10),
    ("C++", 0.09),
    ("Rust", 0.09),
    ("Ruby", 0.08),
];

const OWNERS: [&str; 6] = ["octo", "acme", "hexlab", "northwind", "tidy", "lumen"];
const NAMES: [&str; 8] = ["core", "cli", "server", "sdk", "engine", "docs", "ui", "bench"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Heavy-tailed count: most repositories are small, a few are huge.
    fn popularity(&mut self, scale: f64) -> i64 {
        let u = self.next_f64().max(1e-9);
        (scale * (u.powf(-0.8) - 1.0)).round() as i64
    }

    fn language(&mut self) -> &'static str {
        let mut u = self.next_f64();
        for &(lang, weight) in &LANGUAGES {
            if u < weight {
                return lang;
            }
            u -= weight;
        }
        LANGUAGES[LANGUAGES.len() - 1].0
    }

    /// `value`, or a gap with probability `p`.
    fn gap<T>(&mut self, p: f64, value: T) -> Option<T> {
        (self.next_f64() >= p).then_some(value)
    }
}

struct Repo {
    name: String,
    stars: Option<i64>,
    forks: Option<i64>,
    issues: i64,
    pull_requests: i64,
    contributors: i64,
    language: Option<&'static str>,
}

fn generate(rng: &mut SimpleRng) -> Vec<Repo> {
    (0..ROWS)
        .map(|i| {
            let owner = rng.pick(&OWNERS);
            let name = rng.pick(&NAMES);
            let stars = rng.popularity(40.0);
            let forks = (stars as f64 * (0.05 + 0.3 * rng.next_f64())).round() as i64;
            let issues = (stars as f64 * 0.02 * rng.next_f64()).round() as i64;
            let pull_requests = (issues as f64 * rng.next_f64()).round() as i64;
            let contributors = 1 + (stars as f64).sqrt().round() as i64 / 3;
            let language = rng.language();
            Repo {
                name: format!("{owner}/{name}-{i}"),
                stars: rng.gap(0.03, stars),
                forks: rng.gap(0.03, forks),
                issues,
                pull_requests,
                contributors,
                language: rng.gap(0.08, language),
            }
        })
        .collect()
}

fn write_csv(path: &str, repos: &[Repo]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "repositories",
        "stars_count",
        "forks_count",
        "issues_count",
        "pull_requests",
        "contributors",
        "language",
    ])?;
    let opt = |v: Option<i64>| v.map(|v| v.to_string()).unwrap_or_default();
    for repo in repos {
        writer.write_record([
            repo.name.clone(),
            opt(repo.stars),
            opt(repo.forks),
            repo.issues.to_string(),
            repo.pull_requests.to_string(),
            repo.contributors.to_string(),
            repo.language.unwrap_or_default().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, repos: &[Repo]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("repositories", DataType::Utf8, false),
        Field::new("stars_count", DataType::Int64, true),
        Field::new("forks_count", DataType::Int64, true),
        Field::new("issues_count", DataType::Int64, false),
        Field::new("pull_requests", DataType::Int64, false),
        Field::new("contributors", DataType::Int64, false),
        Field::new("language", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(repos.iter().map(|r| r.name.as_str()))),
            Arc::new(Int64Array::from_iter(repos.iter().map(|r| r.stars))),
            Arc::new(Int64Array::from_iter(repos.iter().map(|r| r.forks))),
            Arc::new(Int64Array::from_iter_values(repos.iter().map(|r| r.issues))),
            Arc::new(Int64Array::from_iter_values(repos.iter().map(|r| r.pull_requests))),
            Arc::new(Int64Array::from_iter_values(repos.iter().map(|r| r.contributors))),
            Arc::new(StringArray::from_iter(repos.iter().map(|r| r.language))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let repos = generate(&mut rng);

    write_csv("github_dataset.csv", &repos)?;
    write_parquet("github_dataset.parquet", &repos)?;

    let gaps = repos
        .iter()
        .filter(|r| r.stars.is_none() || r.forks.is_none() || r.language.is_none())
        .count();
    println!(
        "Wrote {} repositories ({gaps} with missing stars, forks or language) to github_dataset.csv and github_dataset.parquet",
        repos.len()
    );
    Ok(())
}
