//! Gaussian Epilogue Benchmark Suite
//!
//! Benchmarks the transform at its two granularities:
//! - Fragment apply (per-tile cost inside a GEMM inner loop)
//! - Block kernels (whole output blocks, serial vs parallel)
//!
//! Run with: `cargo bench --bench gaussian_bench`

use std::hint::black_box;
use std::time::{Duration, Instant};

use epiforge::kernels::element::{gaussian_rows, gaussian_rows_scalar};
use epiforge::{Fragment, GaussianEpilogue, GaussianParamsBuffer};

// ============================================================================
// Benchmark Harness
// ============================================================================

struct Benchmark {
    name: String,
    iterations: usize,
    warmup_iterations: usize,
}

struct BenchmarkResult {
    name: String,
    mean: Duration,
    min: Duration,
    elements: usize,
}

impl Benchmark {
    fn new(name: &str, iterations: usize) -> Self {
        Benchmark {
            name: name.to_string(),
            iterations,
            warmup_iterations: iterations.min(10),
        }
    }

    fn run<F, R>(&self, elements: usize, mut f: F) -> BenchmarkResult
    where
        F: FnMut() -> R,
    {
        for _ in 0..self.warmup_iterations {
            black_box(f());
        }

        let mut durations = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            let start = Instant::now();
            black_box(f());
            durations.push(start.elapsed());
        }

        let total: Duration = durations.iter().sum();
        BenchmarkResult {
            name: self.name.clone(),
            mean: total / self.iterations as u32,
            min: durations.iter().min().copied().unwrap_or_default(),
            elements,
        }
    }
}

impl BenchmarkResult {
    fn report(&self) {
        let throughput = self.elements as f64 / self.mean.as_secs_f64() / 1e6;
        println!(
            "{:<40} mean {:>10.3?}  min {:>10.3?}  {:>8.1} Melem/s",
            self.name, self.mean, self.min, throughput
        );
    }
}

// ============================================================================
// Parameter setup
// ============================================================================

fn table(width: usize) -> GaussianParamsBuffer<f32> {
    let amplitude: Vec<f32> = (0..width).map(|i| 1.0 + (i % 7) as f32 * 0.25).collect();
    let mean: Vec<f32> = (0..width).map(|i| (i as f32 * 0.013).sin()).collect();
    let std_dev: Vec<f32> = (0..width).map(|i| 0.25 + (i % 11) as f32 * 0.125).collect();
    GaussianParamsBuffer::new(amplitude, mean, std_dev).expect("valid table")
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_fragment_apply() {
    let buffer = table(16);
    let epilogue = GaussianEpilogue::<f32, 16>::new(buffer.params());
    let acc = Fragment::<f32, 16>::from_fn(|i| (i as f32 * 0.31).cos());

    let result = Benchmark::new("fragment apply f32x16", 1_000_000)
        .run(16, || epilogue.apply(black_box(&acc)));
    result.report();
}

fn bench_fragment_apply_f16_out() {
    let buffer = table(16);
    let epilogue = GaussianEpilogue::<half::f16, 16, f32, f32>::new(buffer.params());
    let acc = Fragment::<f32, 16>::from_fn(|i| (i as f32 * 0.31).cos());

    let result = Benchmark::new("fragment apply f32 -> f16 x16", 1_000_000)
        .run(16, || epilogue.apply(black_box(&acc)));
    result.report();
}

fn bench_block_serial(rows: usize, width: usize) {
    let buffer = table(width);
    let accumulators: Vec<f32> = (0..rows * width).map(|i| (i as f32 * 0.17).sin()).collect();
    let mut output = vec![0.0f32; rows * width];

    let result = Benchmark::new(&format!("block serial {}x{}", rows, width), 200).run(
        rows * width,
        || {
            gaussian_rows_scalar(
                buffer.params(),
                black_box(&accumulators),
                width,
                &mut output,
            )
            .expect("valid shape")
        },
    );
    result.report();
}

fn bench_block_parallel(rows: usize, width: usize) {
    let buffer = table(width);
    let accumulators: Vec<f32> = (0..rows * width).map(|i| (i as f32 * 0.17).sin()).collect();
    let mut output = vec![0.0f32; rows * width];

    let result = Benchmark::new(&format!("block parallel {}x{}", rows, width), 200).run(
        rows * width,
        || {
            gaussian_rows(
                buffer.params(),
                black_box(&accumulators),
                width,
                &mut output,
            )
            .expect("valid shape")
        },
    );
    result.report();
}

fn main() {
    println!("Gaussian epilogue benchmarks");
    println!("============================");

    bench_fragment_apply();
    bench_fragment_apply_f16_out();
    bench_block_serial(128, 512);
    bench_block_parallel(128, 512);
    bench_block_parallel(1024, 1024);
}
