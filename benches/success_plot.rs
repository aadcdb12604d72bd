#![feature(test)]

extern crate test;

use rand::distributions::Uniform;
use rand::Rng;
use test::Bencher;
use trkrutils::estimator::estimate_success_plot;

#[bench]
fn success_plot_00100(b: &mut Bencher) {
    bench_success_plot(100, 1, b);
}

#[bench]
fn success_plot_01000(b: &mut Bencher) {
    bench_success_plot(1000, 1, b);
}

#[bench]
fn success_plot_01000_x15(b: &mut Bencher) {
    bench_success_plot(1000, 15, b);
}

fn bench_success_plot(frames: usize, repetitions: usize, b: &mut Bencher) {
    let mut rng = rand::thread_rng();
    let dist = Uniform::new(0.0, 1.0);
    let ratios = (0..repetitions)
        .map(|_| {
            let mut run = (0..frames).map(|_| rng.sample(dist)).collect::<Vec<f64>>();
            run[0] = f64::NAN;
            run
        })
        .collect::<Vec<_>>();

    b.iter(|| {
        estimate_success_plot(&ratios).unwrap();
    });
}
