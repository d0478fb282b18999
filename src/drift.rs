//! Attitude drift under repeated fixed-point composition.
//!
//! An attitude is advanced by the same small rotation (plus optional
//! random jitter) every cycle, the way an attitude estimator
//! integrates gyro increments, while a floating point copy of the same
//! motion is kept as ground truth.  Without renormalization the norm
//! of the fixed-point quaternion wanders off; with it, it stays put.

use crate::atomicfile::AtomicFile;
use crate::prettyfloat::PrettyFloat;
use crate::quaternion::{DQuat, Quat};
use crate::rng::{self, MyRng};
use crate::unit_quaternion::UnitQuaternion;
use crate::vector;

use auto_args::AutoArgs;
use rand::SeedableRng;
use std::io::{self, Error, ErrorKind};
use std::path::{Path, PathBuf};
use vector3d::Vector3d;

/// The parameters needed to configure a drift run.
#[derive(Serialize, Deserialize, Debug, AutoArgs, Clone, PartialEq)]
pub struct DriftParams {
    /// Rotation applied every cycle, in degrees.
    pub step_degrees: f64,
    /// Largest random rotation added to each step, in degrees.
    pub jitter_degrees: f64,
    /// Renormalize after this many cycles (0 means never).
    pub renormalize_every: u64,
    /// Carry the attitude in double precision.
    pub wide: bool,
    /// Number of cycles to run.
    pub cycles: u64,
    /// Print a report and save every this many cycles.
    pub report_every: u64,
    /// The seed for the random number generator.
    pub seed: Option<u64>,
}

impl Default for DriftParams {
    fn default() -> Self {
        DriftParams {
            step_degrees: 0.5,
            jitter_degrees: 0.0,
            renormalize_every: 1,
            wide: false,
            cycles: 100_000,
            report_every: 10_000,
            seed: None,
        }
    }
}

#[derive(AutoArgs, Debug)]
#[allow(non_camel_case_types)]
enum Args {
    _Params {
        _drift: DriftParams,
        /// Where to save the resume file.
        save_as: Option<PathBuf>,
    },
    /// Resume from a saved file.
    ResumeFrom(PathBuf),
}

/// The attitude being integrated, at either precision.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Attitude {
    /// Stored in single precision.
    Single(Quat),
    /// Stored in double precision.
    Double(DQuat),
}

impl Attitude {
    fn identity(wide: bool) -> Self {
        if wide {
            Attitude::Double(Quat::identity().widen())
        } else {
            Attitude::Single(Quat::identity())
        }
    }

    /// The attitude in single precision.
    pub fn quat(self) -> Quat {
        match self {
            Attitude::Single(q) => q,
            Attitude::Double(q) => q.narrow(),
        }
    }

    fn compose(self, step: Quat) -> Self {
        match self {
            Attitude::Single(q) => Attitude::Single(q.multiply(step)),
            Attitude::Double(q) => Attitude::Double(q.narrow().multiply_wide(step)),
        }
    }

    fn renormalize(self) -> Self {
        match self {
            Attitude::Single(q) => Attitude::Single(q.renormalize()),
            Attitude::Double(q) => Attitude::Double(q.renormalize()),
        }
    }
}

/// A drift simulation.
#[derive(Serialize, Deserialize, Debug)]
pub struct DriftSim {
    /// How we were configured.
    pub params: DriftParams,
    /// The random number generator.
    pub rng: MyRng,
    /// The number of cycles run so far.
    pub cycles: u64,
    /// The rotation applied every cycle, before jitter.
    pub step: UnitQuaternion,
    /// The fixed-point attitude.
    pub attitude: Attitude,
    /// The same quantized steps, integrated in floating point.
    pub reference: UnitQuaternion,
    /// The largest `|1 - |q||` seen so far.
    pub worst_norm_error: f64,
    /// The largest angle in radians between attitude and reference.
    pub worst_angle_error: f64,
    /// The latest `Quat::error` from attitude to reference.
    pub error: Vector3d<f64>,
    /// The latest `Quat::error_signed` from attitude to reference.
    pub error_signed: Vector3d<f64>,
    /// Where to save the resume file.
    pub save_as: PathBuf,
}

impl DriftSim {
    /// Start a new simulation.
    pub fn from_params(params: DriftParams, save_as: PathBuf) -> Self {
        let mut rng = match params.seed {
            Some(seed) => MyRng::seed_from_u64(seed),
            None => MyRng::from_entropy(),
        };
        let step = UnitQuaternion::from_axis_angle(rng::vector(&mut rng), params.step_degrees.to_radians());
        DriftSim {
            attitude: Attitude::identity(params.wide),
            params,
            rng,
            cycles: 0,
            step,
            reference: UnitQuaternion::identity(),
            worst_norm_error: 0.0,
            worst_angle_error: 0.0,
            error: Vector3d::new(0.0, 0.0, 0.0),
            error_signed: Vector3d::new(0.0, 0.0, 0.0),
            save_as,
        }
    }

    /// Create a new simulation from command-line flags, or resume one.
    pub fn from_args() -> io::Result<Self> {
        match Args::from_args() {
            Args::_Params { _drift, save_as } => {
                let save_as = save_as.unwrap_or_else(|| PathBuf::from("drift.yaml"));
                DriftSim::resume_or_start(_drift, save_as)
            }
            Args::ResumeFrom(p) => DriftSim::load(&p),
        }
    }

    /// Resume from `save_as` if it exists, running for the cycle count
    /// and report interval in `params`.  Otherwise start afresh.
    pub fn resume_or_start(params: DriftParams, save_as: PathBuf) -> io::Result<Self> {
        if save_as.exists() {
            println!("Resuming from file {:?}", save_as);
            let mut s = DriftSim::load(&save_as)?;
            s.params.cycles = params.cycles;
            s.params.report_every = params.report_every;
            return Ok(s);
        }
        Ok(DriftSim::from_params(params, save_as))
    }

    /// Whether all the requested cycles have been run.
    pub fn finished(&self) -> bool {
        self.cycles >= self.params.cycles
    }

    /// Advance by one cycle.
    pub fn run_once(&mut self) {
        let jitter = rng::rotation(&mut self.rng, self.params.jitter_degrees.to_radians());
        let step = (self.step * jitter).quantize();
        self.attitude = self.attitude.compose(step);
        self.reference = (self.reference * UnitQuaternion::from(step)).normalized();
        self.cycles += 1;

        let every = self.params.renormalize_every;
        if every > 0 && self.cycles % every == 0 {
            self.attitude = self.attitude.renormalize();
        }

        let q = self.attitude.quat();
        let actual = UnitQuaternion::from(q);
        let norm_error = (1.0 - actual.norm2().sqrt()).abs();
        let angle_error = self.reference.angle_to(actual);
        self.worst_norm_error = self.worst_norm_error.max(norm_error);
        self.worst_angle_error = self.worst_angle_error.max(angle_error);

        let setpoint = self.reference.quantize();
        self.error = vector::to_f64(Quat::error(setpoint, q));
        self.error_signed = vector::to_f64(Quat::error_signed(setpoint, q));
    }

    /// Run until finished, reporting and saving along the way.
    pub fn run(&mut self) -> io::Result<()> {
        while !self.finished() {
            self.run_once();
            if self.params.report_every > 0 && self.cycles % self.params.report_every == 0 {
                self.checkpoint()?;
            }
        }
        self.checkpoint()
    }

    /// Print a report and save.
    pub fn checkpoint(&self) -> io::Result<()> {
        self.report();
        self.save()
    }

    /// Print how far we have drifted.
    pub fn report(&self) {
        let q = self.attitude.quat();
        let actual = UnitQuaternion::from(q);
        println!(
            "[{}/{}] norm error {:.3} (fixed {:.3}, worst {:.3}) angle error {:.3} deg (worst {:.3} deg)",
            self.cycles,
            self.params.cycles,
            PrettyFloat((1.0 - actual.norm2().sqrt()).abs()),
            PrettyFloat::from(q.norm_error()),
            PrettyFloat(self.worst_norm_error),
            PrettyFloat(self.reference.angle_to(actual).to_degrees()),
            PrettyFloat(self.worst_angle_error.to_degrees()),
        );
        println!(
            "    error ({:.3}, {:.3}, {:.3}) signed ({:.3}, {:.3}, {:.3})",
            PrettyFloat(self.error.x),
            PrettyFloat(self.error.y),
            PrettyFloat(self.error.z),
            PrettyFloat(self.error_signed.x),
            PrettyFloat(self.error_signed.y),
            PrettyFloat(self.error_signed.z),
        );
    }

    /// Save to `save_as`, as YAML or JSON depending on its extension.
    pub fn save(&self) -> io::Result<()> {
        let mut f = AtomicFile::create(&self.save_as)?;
        match extension(&self.save_as) {
            Some("yaml") => serde_yaml::to_writer(&mut f, self).map_err(invalid_data)?,
            Some("json") => serde_json::to_writer_pretty(&mut f, self).map_err(invalid_data)?,
            _ => return Err(unknown_format(&self.save_as)),
        }
        f.commit()
    }

    /// Load a simulation saved with [`DriftSim::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)?;
        let mut s: DriftSim = match extension(path) {
            Some("yaml") => serde_yaml::from_reader(f).map_err(invalid_data)?,
            Some("json") => serde_json::from_reader(f).map_err(invalid_data)?,
            _ => return Err(unknown_format(path)),
        };
        s.save_as = path.to_path_buf();
        Ok(s)
    }
}

fn extension(p: &Path) -> Option<&str> {
    p.extension().and_then(|x| x.to_str())
}

fn invalid_data<E: std::error::Error + Send + Sync + 'static>(e: E) -> Error {
    Error::new(ErrorKind::InvalidData, e)
}

fn unknown_format(p: &Path) -> Error {
    Error::new(
        ErrorKind::InvalidInput,
        format!("I don't know how to read or write file {:?}", p),
    )
}
