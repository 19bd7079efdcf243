use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};

use crystal_symmetry::config::{SymmetryConfig, DEFAULT_TOLERANCE, DEFAULT_TRIM_TOLERANCE};
use crystal_symmetry::crystal_systems::{
    CellBasis, CrystalFamilyIdentification, FamilyType, MetricConstraintCatalog, MetricConstraintFamily,
    MetricParameterSet, Variation,
};
use crystal_symmetry::interfaces::NumericComparer;
use crystal_symmetry::symmetries::{configured_operations, PermutationSlotMachine, PointOperationGroup};
use crystal_symmetry::Result;
use nalgebra::Vector3;

#[derive(Parser)]
#[command(name = "crystal-symmetry")]
#[command(about = "Crystal family metric checks and site symmetry reduction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Equality tolerance for lengths, angles and coordinates
    #[arg(short, long, global = true, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Range within which transformed coordinates snap onto integers
    #[arg(long, global = true, default_value_t = DEFAULT_TRIM_TOLERANCE)]
    trim_tolerance: f64,

    /// Largest point sequence the orbit command accepts
    #[arg(long, global = true)]
    max_points: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the default parameters and fixed flags of a crystal family
    Family {
        /// Family type (triclinic, monoclinic, ..., cubic)
        family: FamilyType,

        /// Setting variation (a, b, c, hexagonal, rhombohedral)
        #[arg(long, default_value = "none")]
        variation: Variation,
    },
    /// Validate a parameter set (angles in degrees) against a crystal family
    Check {
        family: FamilyType,

        #[arg(long, default_value = "none")]
        variation: Variation,

        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
        #[arg(allow_negative_numbers = true)]
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    },
    /// Reduce a point sequence around an origin with a reference point group
    Orbit {
        /// Point group symbol (1, -1, 2/m, mmm, 4/mmm, -3m, -3m:r, 6/mmm, m-3m)
        #[arg(short, long, default_value = "m-3m", allow_hyphen_values = true)]
        group: String,

        /// Origin point in fractional coordinates
        #[arg(num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        origin: Vec<f64>,

        /// Sequence point in fractional coordinates, repeatable
        #[arg(short, long = "point", num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        points: Vec<f64>,

        /// Labels to decorate the sequence with, comma separated
        #[arg(long, value_delimiter = ',')]
        labels: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = SymmetryConfig {
        tolerance: cli.tolerance,
        trim_tolerance: cli.trim_tolerance,
        max_sequence_length: cli.max_points,
        ..SymmetryConfig::default()
    };
    info!("Starting crystal-symmetry v{}", crystal_symmetry::VERSION);

    match cli.command {
        Commands::Family { family, variation } => show_family(&config, family, variation),
        Commands::Check {
            family,
            variation,
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        } => {
            let candidate = MetricParameterSet::from_degrees(a, b, c, alpha, beta, gamma);
            check_parameters(&config, family, variation, &candidate)
        }
        Commands::Orbit {
            group,
            origin,
            points,
            labels,
        } => run_orbit(&config, &group, &origin, &points, &labels),
    }
}

fn lookup_family(config: &SymmetryConfig, family: FamilyType, variation: Variation) -> Result<MetricConstraintFamily> {
    let catalog = MetricConstraintCatalog::from_config(config);
    Ok(catalog.get_family(CrystalFamilyIdentification::new(family, variation))?)
}

fn show_family(config: &SymmetryConfig, family: FamilyType, variation: Variation) -> Result<()> {
    let family = lookup_family(config, family, variation)?;
    let defaults = family.default_parameter_set();
    let [alpha, beta, gamma] = defaults.angles_in_degrees();
    let fixed = family.fixed_parameters();

    println!("{}", family.family());
    println!("  default: a={} b={} c={} alpha={:.4} beta={:.4} gamma={:.4}", defaults.a, defaults.b, defaults.c, alpha, beta, gamma);
    println!(
        "  fixed:   a={} b={} c={} alpha={} beta={} gamma={}",
        fixed.a, fixed.b, fixed.c, fixed.alpha, fixed.beta, fixed.gamma
    );
    Ok(())
}

fn check_parameters(
    config: &SymmetryConfig,
    family: FamilyType,
    variation: Variation,
    candidate: &MetricParameterSet,
) -> Result<()> {
    let family = lookup_family(config, family, variation)?;
    match family.try_set_parameter_values(candidate) {
        Some(accepted) => {
            let parameters = accepted.parameters();
            let [alpha, beta, gamma] = parameters.angles_in_degrees();
            println!("accepted by {}", accepted.family());
            println!(
                "  a={} b={} c={} alpha={:.4} beta={:.4} gamma={:.4}",
                parameters.a, parameters.b, parameters.c, alpha, beta, gamma
            );
            let basis = CellBasis::from_family(&accepted)?;
            println!("  volume: {:.6}", basis.volume());
        }
        None => {
            println!("rejected by {}", family.family());
            if !family.validate_angle_conditions(candidate.alpha, candidate.beta, candidate.gamma) {
                println!("  angle conditions violated");
            }
            if !family.validate_parameter_conditions(candidate.a, candidate.b, candidate.c) {
                println!("  length conditions violated (bound {})", family.parameter_max());
            }
        }
    }
    Ok(())
}

fn run_orbit(config: &SymmetryConfig, symbol: &str, origin: &[f64], points: &[f64], labels: &[String]) -> Result<()> {
    let operations = configured_operations(symbol, config)?;
    let origin = match origin {
        [x, y, z] => Vector3::new(*x, *y, *z),
        _ => Vector3::zeros(),
    };
    let sequence: Vec<Vector3<f64>> = points.chunks_exact(3).map(|p| Vector3::new(p[0], p[1], p[2])).collect();
    if !config.accepts_sequence_length(sequence.len()) {
        return Err(format!(
            "Point sequence of length {} exceeds --max-points {}",
            sequence.len(),
            config.max_sequence_length.unwrap_or_default()
        )
        .into());
    }

    let comparer = NumericComparer::new(config.tolerance);
    let group = PointOperationGroup::build(&operations, origin, sequence, &comparer, None)?;

    println!("group {} ({} operations), origin {:?}", symbol, operations.len(), group.origin_point().as_slice());
    println!("  stabilizer size:          {}", group.local_sequence_operations().len());
    println!("  orbit size:               {}", group.unique_origin_site_count());
    println!("  order preserving unique:  {}", group.order_preserving_extension_count_per_site());
    println!("  order ignoring unique:    {}", group.order_ignoring_extension_count_per_site());
    println!("  self projections:         {}", group.order_ignoring_self_projection_operations().len());
    println!("  full self projection:     {}", group.is_full_self_projection());
    for order in group.self_projection_orders() {
        println!("  order {:?}", order);
    }

    if !labels.is_empty() {
        if group.point_sequence().is_empty() {
            warn!("Labels given without sequence points. Ignoring.");
            return Ok(());
        }
        let machine = PermutationSlotMachine::uniform(labels, group.point_sequence().len());
        let unique = group.unique_permutations(
            &machine,
            |a, b| a == b,
            |label| label.bytes().fold(17u64, |hash, byte| hash.wrapping_mul(31).wrapping_add(byte as u64)),
            None,
        )?;
        println!("  unique decorations:       {} of {}", unique.len(), machine.permutation_count());
        for decoration in unique {
            println!("    {}", decoration.join(" "));
        }
    }
    Ok(())
}
