use std::path::PathBuf;

/// Values used when neither the config file nor the command line provides one.
///
/// Spectrum settings not listed here fall back to the core builder's defaults.
pub struct DefaultsConfig {
    pub ground: PathBuf,
    pub excited: PathBuf,
    pub phonons: PathBuf,
    pub output_dir: PathBuf,
    pub zpl: f64,
    pub gamma: f64,
    pub t_max_fs: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ground: PathBuf::from("CONTCAR_GS"),
            excited: PathBuf::from("CONTCAR_ES"),
            phonons: PathBuf::from("band.yaml"),
            output_dir: PathBuf::from("photolum-output"),
            zpl: 1945.0,
            gamma: 4.0,
            t_max_fs: 2000.0,
        }
    }
}
