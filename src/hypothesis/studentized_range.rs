// Studentized range distribution
//
// CDF of the range of `k` independent standard normals divided by an
// independent chi/sqrt(df) estimate, computed by Gauss-Legendre quadrature
// (Copenhaver & Holland, 1988). Accurate to roughly 1e-8 over the range
// Tukey HSD needs.

use statrs::function::erf::erfc;
use statrs::function::gamma::ln_gamma;
use std::f64::consts::{LN_2, PI, SQRT_2};

// 12-point Gauss-Legendre nodes/weights (positive half) for the inner integral
const INNER_NODES: [f64; 6] = [
    0.981_560_634_246_719_3,
    0.904_117_256_370_474_9,
    0.769_902_674_194_304_7,
    0.587_317_954_286_617_4,
    0.367_831_498_998_180_2,
    0.125_233_408_511_468_9,
];
const INNER_WEIGHTS: [f64; 6] = [
    0.047_175_336_386_511_83,
    0.106_939_325_995_318_4,
    0.160_078_328_543_346_2,
    0.203_167_426_723_065_9,
    0.233_492_536_538_354_8,
    0.249_147_045_813_402_8,
];

// 16-point Gauss-Legendre nodes/weights (positive half) for the outer integral
const OUTER_NODES: [f64; 8] = [
    0.989_400_934_991_649_9,
    0.944_575_023_073_232_6,
    0.865_631_202_387_831_7,
    0.755_404_408_355_003,
    0.617_876_244_402_643_7,
    0.458_016_777_657_227_4,
    0.281_603_550_779_258_9,
    0.095_012_509_837_637_44,
];
const OUTER_WEIGHTS: [f64; 8] = [
    0.027_152_459_411_754_09,
    0.062_253_523_938_647_89,
    0.095_158_511_682_492_78,
    0.124_628_971_255_533_9,
    0.149_595_988_816_576_7,
    0.169_156_519_395_002_5,
    0.182_603_415_044_923_6,
    0.189_450_610_455_068_5,
];

/// Standard normal CDF
fn phi(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// P(range of k standard normals < w), i.e. the df = ∞ case
fn range_cdf(w: f64, k: f64) -> f64 {
    const UPPER: f64 = 8.0;
    const EXP_FLOOR: f64 = -30.0;
    const MAX_EXPONENT: f64 = 60.0;

    let half = w * 0.5;
    if half >= UPPER {
        return 1.0;
    }

    let mut pr_w = 2.0 * phi(half) - 1.0;
    pr_w = if pr_w >= 1.0 { 1.0 } else { pr_w.powf(k) };

    let intervals = if w > 3.0 { 2 } else { 3 };
    let step = (UPPER - half) / f64::from(intervals);
    let mut lower = half;
    let mut upper = half + step;
    let k1 = k - 1.0;
    let mut total = 0.0;

    for _ in 0..intervals {
        let center = 0.5 * (upper + lower);
        let radius = 0.5 * (upper - lower);
        let mut interval_sum = 0.0;

        for jj in 0..12 {
            let (node, weight) = if jj < 6 {
                (-INNER_NODES[jj], INNER_WEIGHTS[jj])
            } else {
                (INNER_NODES[11 - jj], INNER_WEIGHTS[11 - jj])
            };
            let z = center + radius * node;
            let exponent = z * z;
            if exponent > MAX_EXPONENT {
                break;
            }
            let inner = phi(z) - phi(z - w);
            if inner >= (EXP_FLOOR / k1).exp() {
                interval_sum += weight * (-0.5 * exponent).exp() * inner.powf(k1);
            }
        }

        total += interval_sum * (2.0 * radius * k) / (2.0 * PI).sqrt();
        lower = upper;
        upper += step;
    }

    pr_w += total;
    if pr_w <= EXP_FLOOR.exp() {
        return 0.0;
    }
    pr_w.min(1.0)
}

/// CDF of the studentized range for `k` means and `df` error degrees of freedom
pub fn studentized_range_cdf(q: f64, k: usize, df: f64) -> f64 {
    const EXP_FLOOR: f64 = -30.0;
    const TOLERANCE: f64 = 1.0e-14;

    if q <= 0.0 || q.is_nan() {
        return 0.0;
    }
    if q.is_infinite() {
        return 1.0;
    }
    let k = k as f64;
    if df > 25_000.0 {
        return range_cdf(q, k);
    }

    let half_df = df * 0.5;
    let step: f64 = if df <= 100.0 {
        1.0
    } else if df <= 800.0 {
        0.5
    } else if df <= 5000.0 {
        0.25
    } else {
        0.125
    };
    let log_norm = half_df * df.ln() - df * LN_2 - ln_gamma(half_df) + step.ln();
    let shape = half_df - 1.0;
    let rate = df * 0.25;

    let mut total = 0.0;
    for i in 1..=50 {
        let mid = f64::from(2 * i - 1) * step;
        let mut interval_sum = 0.0;

        for jj in 0..16 {
            let (offset, weight) = if jj < 8 {
                (-OUTER_NODES[jj] * step, OUTER_WEIGHTS[jj])
            } else {
                (OUTER_NODES[jj - 8] * step, OUTER_WEIGHTS[jj - 8])
            };
            let u = mid + offset;
            let log_density = log_norm + shape * u.ln() - u * rate;
            if log_density >= EXP_FLOOR {
                let scaled_q = q * (u * 0.5).sqrt();
                interval_sum += range_cdf(scaled_q, k) * weight * log_density.exp();
            }
        }

        if f64::from(i) * step >= 1.0 && interval_sum <= TOLERANCE {
            break;
        }
        total += interval_sum;
    }

    total.clamp(0.0, 1.0)
}

/// Inverse CDF by bisection
pub fn studentized_range_quantile(p: f64, k: usize, df: f64) -> f64 {
    if p <= 0.0 {
        return 0.0;
    }
    let mut lower = 0.0;
    let mut upper = 1.0;
    while studentized_range_cdf(upper, k, df) < p && upper < 1.0e3 {
        lower = upper;
        upper *= 2.0;
    }
    for _ in 0..100 {
        let mid = 0.5 * (lower + upper);
        if studentized_range_cdf(mid, k, df) < p {
            lower = mid;
        } else {
            upper = mid;
        }
        if upper - lower < 1.0e-9 {
            break;
        }
    }
    0.5 * (lower + upper)
}
