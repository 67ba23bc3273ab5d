//! Molecular weight statistics grouped by cellular location.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::target::Target;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationWeights {
    #[serde(rename = "Cellular location")]
    pub location: String,
    #[serde(rename = "Targets")]
    pub count: usize,
    #[serde(rename = "Average molecular weight")]
    pub mean: f64,
    /// Sample standard deviation; `None` for a single observation.
    #[serde(rename = "Standard deviation")]
    pub std_dev: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anova {
    pub f_statistic: f64,
    pub df_between: usize,
    pub df_within: usize,
    pub p_value: f64,
}

/// Parsed weights per cellular location, in first-seen order. Targets with
/// an empty location or no usable weight are left out.
#[must_use]
pub fn weights_by_location(targets: &[Target]) -> IndexMap<String, Vec<f64>> {
    let mut groups: IndexMap<String, Vec<f64>> = IndexMap::new();

    for target in targets {
        let location = target.polypeptide.cellular_location.trim();
        if location.is_empty() {
            continue;
        }

        match target.polypeptide.molecular_weight_value() {
            Ok(Some(weight)) => groups.entry(location.to_string()).or_default().push(weight),
            Ok(None) => {}
            Err(e) => warn!(target_id = %target.id, error = %e, "Excluding molecular weight"),
        }
    }

    groups
}

/// Count, mean and spread per location, highest mean first.
#[must_use]
pub fn location_weights(targets: &[Target]) -> Vec<LocationWeights> {
    let mut rows: Vec<LocationWeights> = weights_by_location(targets)
        .into_iter()
        .map(|(location, weights)| LocationWeights {
            count: weights.len(),
            mean: mean(&weights),
            std_dev: sample_std_dev(&weights),
            location,
        })
        .collect();

    rows.sort_by(|a, b| b.mean.total_cmp(&a.mean).then_with(|| a.location.cmp(&b.location)));
    rows
}

/// One-way ANOVA across groups. `None` with fewer than two non-empty groups,
/// no within-group degrees of freedom, or no variance at all.
#[must_use]
pub fn one_way_anova<'a, I>(groups: I) -> Option<Anova>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let groups: Vec<&[f64]> = groups.into_iter().filter(|g| !g.is_empty()).collect();
    let k = groups.len();
    let n: usize = groups.iter().map(|g| g.len()).sum();

    if k < 2 || n <= k {
        return None;
    }

    let grand = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n as f64;
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in &groups {
        let m = mean(group);
        ss_between += group.len() as f64 * (m - grand).powi(2);
        ss_within += group.iter().map(|x| (x - m).powi(2)).sum::<f64>();
    }

    let df_between = k - 1;
    let df_within = n - k;

    if ss_within == 0.0 {
        if ss_between == 0.0 {
            return None;
        }
        return Some(Anova {
            f_statistic: f64::INFINITY,
            df_between,
            df_within,
            p_value: 0.0,
        });
    }

    let d1 = df_between as f64;
    let d2 = df_within as f64;
    let f_statistic = (ss_between / d1) / (ss_within / d2);
    let p_value = regularized_incomplete_beta(d2 / 2.0, d1 / 2.0, d2 / d1.mul_add(f_statistic, d2));

    Some(Anova {
        f_statistic,
        df_between,
        df_within,
        p_value,
    })
}

/// ANOVA of molecular weight across cellular locations.
#[must_use]
pub fn weight_anova(targets: &[Target]) -> Option<Anova> {
    let groups = weights_by_location(targets);
    one_way_anova(groups.values().map(Vec::as_slice))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

fn ln_gamma(x: f64) -> f64 {
    // Lanczos approximation, g = 7
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut sum = COEFFS[0];
    for (i, c) in COEFFS.iter().enumerate().skip(1) {
        sum += c / (x + i as f64);
    }
    let t = x + 7.5;
    0.5f64.mul_add((2.0 * std::f64::consts::PI).ln(), (x + 0.5) * t.ln()) - t + sum.ln()
}

/// I_x(a, b), evaluated with the continued fraction on whichever side
/// converges.
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();

    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 300;
    const EPS: f64 = 1e-14;
    const TINY: f64 = 1e-300;

    let clamp = |v: f64| if v.abs() < TINY { TINY } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 / clamp(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / clamp(aa.mul_add(d, 1.0));
        c = clamp(1.0 + aa / c);
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / clamp(aa.mul_add(d, 1.0));
        c = clamp(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }

    h
}
