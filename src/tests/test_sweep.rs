use crate::profile::ProfileConfig;
use crate::sweep::{SampleDistribution, SweepConfig, dimension_sweep, sample_points};
use dimscope_core::DimError;

#[test]
fn test_sweep_rows_per_dimension() {
    crate::init();
    let config = SweepConfig::default()
        .with_dims(vec![1, 2, 10])
        .with_n_points(50)
        .with_seed(42);
    let report = dimension_sweep(&config).unwrap();

    assert_eq!(report.seed, 42);
    assert_eq!(report.rows.len(), 3);
    let dims: Vec<usize> = report.rows.iter().map(|r| r.dim).collect();
    assert_eq!(dims, vec![1, 2, 10]);
    for row in &report.rows {
        assert_eq!(row.radii.count, 50);
        assert_eq!(row.distances.n_pairs, 50 * 49 / 2);
        assert!(row.profile.is_none());
    }
}

#[test]
fn test_sweep_mean_radius_grows_and_contrast_shrinks() {
    crate::init();
    let config = SweepConfig::default()
        .with_dims(vec![2, 200])
        .with_n_points(100)
        .with_distribution(SampleDistribution::StandardGaussian)
        .with_seed(7);
    let report = dimension_sweep(&config).unwrap();
    let low = &report.rows[0];
    let high = &report.rows[1];

    // gaussian radii concentrate near sqrt(d)
    assert!(high.radii.mean_norm > 10.0 * low.radii.mean_norm / 2.0);
    assert!(high.radii.relative_spread() < low.radii.relative_spread());
    assert!(high.distances.relative_contrast < low.distances.relative_contrast);
}

#[test]
fn test_sweep_reproducible_with_seed() {
    let config = SweepConfig::default()
        .with_dims(vec![3, 5])
        .with_n_points(20)
        .with_seed(99);
    assert_eq!(
        dimension_sweep(&config).unwrap(),
        dimension_sweep(&config).unwrap()
    );
}

#[test]
fn test_sweep_with_profiles() {
    let config = SweepConfig::default()
        .with_dims(vec![4])
        .with_n_points(30)
        .with_profiles(ProfileConfig::normalized().with_grid_size(32))
        .with_seed(1);
    let report = dimension_sweep(&config).unwrap();
    let profile = report.rows[0].profile.as_ref().unwrap();
    assert_eq!(profile.density.grid.len(), 32);
    assert_eq!(*profile.cumulative.fractions.last().unwrap(), 1.0);
    assert!(profile.values.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_sweep_blobs_distribution() {
    let config = SweepConfig::default()
        .with_dims(vec![3])
        .with_n_points(30)
        .with_distribution(SampleDistribution::Blobs {
            n_centers: 2,
            cluster_std: 0.5,
        })
        .with_seed(4);
    let report = dimension_sweep(&config).unwrap();
    assert_eq!(report.rows[0].radii.count, 30);
}

#[test]
fn test_uniform_cube_bounds() {
    let ps = sample_points(SampleDistribution::UniformCube, 40, 6, 3).unwrap();
    assert_eq!(ps.shape(), (40, 6));
    assert!(ps.as_slice().iter().all(|x| (0.0..1.0).contains(x)));
}

#[test]
fn test_sweep_invalid_config() {
    let base = SweepConfig::default().with_seed(1);
    for config in [
        base.clone().with_dims(vec![]),
        base.clone().with_dims(vec![2, 0]),
        base.clone().with_n_points(1),
    ] {
        assert!(matches!(
            dimension_sweep(&config),
            Err(DimError::InvalidInput(_))
        ));
    }
}

#[test]
fn test_distribution_parsing() {
    assert_eq!(
        "uniform".parse::<SampleDistribution>().unwrap(),
        SampleDistribution::UniformCube
    );
    assert_eq!(
        "gaussian".parse::<SampleDistribution>().unwrap(),
        SampleDistribution::StandardGaussian
    );
    assert!(matches!(
        "blobs".parse::<SampleDistribution>().unwrap(),
        SampleDistribution::Blobs { n_centers: 3, .. }
    ));
    assert!("cauchy".parse::<SampleDistribution>().is_err());
}
