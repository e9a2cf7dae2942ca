use clap::error::ErrorKind;
use clap::{
    Arg, ArgAction, ArgGroup, ArgMatches, Args, Command, CommandFactory, FromArgMatches, Id, Parser,
};
use dirpatch::utils::path::normalize_root;
use dirpatch::ChecksumAlgorithm;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dirpatch")]
#[command(about = "Reconcile two directory trees into a pair of patches", long_about = None)]
pub struct Cli {
    /// First directory tree
    #[arg(value_name = "DIR_A", required_unless_present = "print_config")]
    pub dir_a: Option<PathBuf>,

    /// Second directory tree
    #[arg(value_name = "DIR_B", required_unless_present = "print_config")]
    pub dir_b: Option<PathBuf>,

    /// Leave unchanged entries out of the report
    #[arg(short = 'u', long)]
    pub ignore_unchanged: bool,

    #[command(flatten)]
    pub checksum: ChecksumSelection,

    /// Write the report here instead of the configured path
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print configuration values and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Both roots, normalized, after checking each is an existing directory.
    pub fn roots(&self) -> Result<(PathBuf, PathBuf), clap::Error> {
        let (Some(dir_a), Some(dir_b)) = (&self.dir_a, &self.dir_b) else {
            return Err(Cli::command().error(
                ErrorKind::MissingRequiredArgument,
                "both DIR_A and DIR_B are required",
            ));
        };

        let root_a = normalize_root(dir_a);
        let root_b = normalize_root(dir_b);

        for root in [&root_a, &root_b] {
            if !root.is_dir() {
                return Err(Cli::command().error(
                    ErrorKind::ValueValidation,
                    format!("'{}' is not a directory", root.display()),
                ));
            }
        }

        Ok((root_a, root_b))
    }
}

const CHECKSUM_GROUP: &str = "checksum";

/// One flag per registry entry; each flag id parses as a [`ChecksumAlgorithm`].
const CHECKSUM_FLAGS: [(&str, &str); 7] = [
    ("md5", "Compare with MD5 checksums (default)"),
    ("sha1", "Compare with SHA-1 checksums"),
    ("sha256", "Compare with SHA-256 checksums"),
    ("adler32", "Compare with Adler-32 checksums"),
    ("crc32", "Compare with CRC-32 checksums"),
    ("xxhash", "Compare with XXH64 checksums"),
    ("blake3", "Compare with BLAKE3 checksums"),
];

/// The algorithm picked by at most one checksum flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChecksumSelection {
    pub algorithm: ChecksumAlgorithm,
}

impl FromArgMatches for ChecksumSelection {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let algorithm = match matches.get_one::<Id>(CHECKSUM_GROUP) {
            Some(flag) => flag
                .as_str()
                .parse::<ChecksumAlgorithm>()
                .map_err(|err| clap::Error::raw(ErrorKind::InvalidValue, err))?,
            None => ChecksumAlgorithm::default(),
        };
        Ok(Self { algorithm })
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        *self = Self::from_arg_matches(matches)?;
        Ok(())
    }
}

impl Args for ChecksumSelection {
    fn augment_args(cmd: Command) -> Command {
        let cmd = CHECKSUM_FLAGS.iter().fold(cmd, |cmd, (flag, help)| {
            cmd.arg(
                Arg::new(*flag)
                    .long(*flag)
                    .help(*help)
                    .action(ArgAction::SetTrue),
            )
        });
        cmd.group(
            ArgGroup::new(CHECKSUM_GROUP)
                .args(CHECKSUM_FLAGS.map(|(flag, _)| flag))
                .multiple(false),
        )
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}
