use argh::FromArgs;
use serde::Serialize;

use ndimg::{
    imgproc::{
        filter::{convolve, gaussian_filter_with_mode},
        labeled::{border, borders, labels_present},
        padding::BoundaryMode,
        wavelet::{daubechies, haar, idaubechies, ihaar, WaveletFamily},
    },
    tensor::NdArray,
};

#[derive(FromArgs)]
/// Run every filter on a synthetic image and report summary statistics
struct Args {
    /// side of the square test image (default: 256)
    #[argh(option, short = 's', default = "256")]
    size: usize,

    /// gaussian standard deviation (default: 2.0)
    #[argh(option, default = "2.0")]
    sigma: f64,

    /// boundary mode: reflect, constant, nearest, mirror, wrap, ignore (default: reflect)
    #[argh(option, short = 'm', default = "BoundaryMode::Reflect", from_str_fn(parse_mode))]
    mode: BoundaryMode,

    /// daubechies family, D2 to D20 (default: D4)
    #[argh(option, short = 'w', default = "WaveletFamily::D4", from_str_fn(parse_family))]
    wavelet: WaveletFamily,

    /// print the summary as JSON on stdout
    #[argh(switch)]
    json: bool,
}

fn parse_mode(value: &str) -> Result<BoundaryMode, String> {
    value.parse().map_err(|e| format!("{e}"))
}

fn parse_family(value: &str) -> Result<WaveletFamily, String> {
    value.parse().map_err(|e| format!("{e}"))
}

#[derive(Debug, Serialize)]
struct Stats {
    min: f64,
    max: f64,
    mean: f64,
}

impl Stats {
    fn of(values: &NdArray<f64>) -> Self {
        let (min, max, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v),
        );
        Self {
            min,
            max,
            mean: sum / values.numel().max(1) as f64,
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    size: usize,
    mode: String,
    wavelet: String,
    box_blur: Stats,
    gaussian: Stats,
    haar_round_trip_error: f64,
    daubechies_round_trip_error: f64,
    labels: Vec<u8>,
    border_pixels: usize,
    border_1_2_pixels: Option<usize>,
}

fn max_abs_diff(a: &NdArray<f64>, b: &NdArray<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // synthetic image: a diagonal ramp with a bright disc
    let n = args.size;
    let image = NdArray::<u8>::from_shape_fn(&[n, n], |idx| {
        let (r, c) = (idx[0] as f64, idx[1] as f64);
        let centre = n as f64 / 2.0;
        let inside = (r - centre).powi(2) + (c - centre).powi(2) < (n as f64 / 5.0).powi(2);
        if inside {
            255
        } else {
            ((r + c) * 200.0 / (2.0 * n as f64)) as u8
        }
    });
    let as_f64 = image.cast::<f64>();
    log::info!("image: {}x{} mode={} wavelet={}", n, n, args.mode, args.wavelet);

    let box_kernel = NdArray::<f64>::from_shape_val(&[5, 5], 1.0 / 25.0);
    let blurred = convolve(&image, &box_kernel, args.mode)?;
    log::info!("box blur: {:?}", Stats::of(&blurred));

    let smooth = gaussian_filter_with_mode(&image, args.sigma, 0, args.mode)?;
    log::info!("gaussian sigma={}: {:?}", args.sigma, Stats::of(&smooth));

    let haar_back = ihaar(&haar(&image, true)?, true)?;
    let haar_error = max_abs_diff(&as_f64, &haar_back);
    log::info!("haar round trip error: {:e}", haar_error);

    let daub_back = idaubechies(&daubechies(&image, args.wavelet)?, args.wavelet)?;
    let daub_error = max_abs_diff(&as_f64, &daub_back);
    log::info!("{} round trip error: {:e}", args.wavelet, daub_error);

    let labels = image.map(|&v| match v {
        255 => 2u8,
        v if v >= 100 => 1,
        _ => 0,
    });
    let all_borders = borders(&labels)?;
    let border_pixels = all_borders.iter().filter(|&&m| m).count();
    let pair = border(&labels, 1, 2, false)?;
    let border_1_2_pixels = pair.map(|b| b.iter().filter(|&&m| m).count());
    log::info!(
        "borders: {} pixels, between 1 and 2: {:?}",
        border_pixels,
        border_1_2_pixels
    );

    let summary = Summary {
        size: n,
        mode: args.mode.to_string(),
        wavelet: args.wavelet.to_string(),
        box_blur: Stats::of(&blurred),
        gaussian: Stats::of(&smooth),
        haar_round_trip_error: haar_error,
        daubechies_round_trip_error: daub_error,
        labels: labels_present(&labels),
        border_pixels,
        border_1_2_pixels,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
