use std::{
    env, fmt,
    net::{AddrParseError, SocketAddr},
    str::FromStr,
};

use core_sim::GameConfig;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

const ENV_ADDR: &str = "TRADE_SERVER_ADDR";
const ENV_SEED: &str = "TRADE_SEED";
const ENV_STARTING_CASH: &str = "TRADE_STARTING_CASH";
const ENV_TOTAL_STEPS: &str = "TRADE_TOTAL_STEPS";
const ENV_START_PRICE: &str = "TRADE_START_PRICE";
const ENV_PRICE_FLOOR: &str = "TRADE_PRICE_FLOOR";
const ENV_VOLATILITY: &str = "TRADE_VOLATILITY";
const ENV_DRIFT_BIAS: &str = "TRADE_DRIFT_BIAS";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub seed: Option<u64>,
    pub game: GameConfig,
}

#[derive(Debug, Clone)]
pub enum ConfigError {
    InvalidListenAddr(AddrParseError),
    InvalidSeed,
    InvalidStartingCash,
    InvalidTotalSteps,
    InvalidStartPrice,
    InvalidPriceFloor,
    InvalidVolatility,
    InvalidDriftBias,
    InvalidGame(core_sim::ConfigError),
    NonUnicode(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidListenAddr(err) => {
                write!(f, "{ENV_ADDR} is not a valid socket address: {err}")
            }
            Self::InvalidSeed => write!(f, "{ENV_SEED} must be an unsigned 64-bit integer"),
            Self::InvalidStartingCash => write!(f, "{ENV_STARTING_CASH} must be a finite number"),
            Self::InvalidTotalSteps => {
                write!(f, "{ENV_TOTAL_STEPS} must be a positive integer")
            }
            Self::InvalidStartPrice => write!(f, "{ENV_START_PRICE} must be a finite number"),
            Self::InvalidPriceFloor => write!(f, "{ENV_PRICE_FLOOR} must be a finite number"),
            Self::InvalidVolatility => write!(f, "{ENV_VOLATILITY} must be a finite number"),
            Self::InvalidDriftBias => write!(f, "{ENV_DRIFT_BIAS} must be a finite number"),
            Self::InvalidGame(err) => write!(f, "invalid game parameters: {err}"),
            Self::NonUnicode(key) => write!(f, "{key} contains non-unicode data"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidListenAddr(err) => Some(err),
            Self::InvalidGame(err) => Some(err),
            _ => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match env::var(ENV_ADDR) {
            Ok(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            Err(env::VarError::NotPresent) => DEFAULT_LISTEN_ADDR
                .parse()
                .map_err(ConfigError::InvalidListenAddr)?,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicode(ENV_ADDR));
            }
        };

        let seed = parse_env::<u64>(ENV_SEED, ConfigError::InvalidSeed)?;

        let defaults = GameConfig::default();
        let game = GameConfig {
            total_steps: parse_env(ENV_TOTAL_STEPS, ConfigError::InvalidTotalSteps)?
                .unwrap_or(defaults.total_steps),
            starting_cash: parse_finite_env(ENV_STARTING_CASH, ConfigError::InvalidStartingCash)?
                .unwrap_or(defaults.starting_cash),
            start_price: parse_finite_env(ENV_START_PRICE, ConfigError::InvalidStartPrice)?
                .unwrap_or(defaults.start_price),
            price_floor: parse_finite_env(ENV_PRICE_FLOOR, ConfigError::InvalidPriceFloor)?
                .unwrap_or(defaults.price_floor),
            volatility: parse_finite_env(ENV_VOLATILITY, ConfigError::InvalidVolatility)?
                .unwrap_or(defaults.volatility),
            drift_bias: parse_finite_env(ENV_DRIFT_BIAS, ConfigError::InvalidDriftBias)?
                .unwrap_or(defaults.drift_bias),
        };
        game.validate().map_err(ConfigError::InvalidGame)?;

        Ok(Self {
            listen_addr,
            seed,
            game,
        })
    }
}

fn parse_env<T: FromStr>(
    key: &'static str,
    invalid_error: ConfigError,
) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value.trim().parse().map(Some).map_err(|_| invalid_error),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode(key)),
    }
}

fn parse_finite_env(
    key: &'static str,
    invalid_error: ConfigError,
) -> Result<Option<f64>, ConfigError> {
    match parse_env::<f64>(key, invalid_error.clone())? {
        Some(value) if !value.is_finite() => Err(invalid_error),
        parsed => Ok(parsed),
    }
}

#[cfg(test)]
mod tests {
    use std::{env, sync::Mutex};

    use super::{
        Config, ConfigError, ENV_ADDR, ENV_DRIFT_BIAS, ENV_PRICE_FLOOR, ENV_SEED,
        ENV_STARTING_CASH, ENV_START_PRICE, ENV_TOTAL_STEPS, ENV_VOLATILITY,
    };

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvVarGuard {
        key: &'static str,
        previous: Option<std::ffi::OsString>,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }

        fn unset(key: &'static str) -> Self {
            let previous = env::var_os(key);
            env::remove_var(key);
            Self { key, previous }
        }

        #[cfg(unix)]
        fn set_os(key: &'static str, value: std::ffi::OsString) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match self.previous.take() {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }

    fn reset_config_env_baseline() -> Vec<EnvVarGuard> {
        [
            ENV_ADDR,
            ENV_SEED,
            ENV_STARTING_CASH,
            ENV_TOTAL_STEPS,
            ENV_START_PRICE,
            ENV_PRICE_FLOOR,
            ENV_VOLATILITY,
            ENV_DRIFT_BIAS,
        ]
        .into_iter()
        .map(EnvVarGuard::unset)
        .collect()
    }

    #[test]
    fn defaults_when_env_is_unset() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.seed, None);
        assert_eq!(config.game, core_sim::GameConfig::default());
    }

    #[test]
    fn uses_listen_address_override_from_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_ADDR, "127.0.0.1:9090");

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9090".parse().unwrap());
    }

    #[test]
    fn returns_error_for_invalid_listen_address_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_ADDR, "not-an-addr");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidListenAddr(_)));
    }

    #[test]
    fn reads_seed_and_walk_overrides() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _seed = EnvVarGuard::set(ENV_SEED, "42");
        let _steps = EnvVarGuard::set(ENV_TOTAL_STEPS, "30");
        let _cash = EnvVarGuard::set(ENV_STARTING_CASH, "500");
        let _volatility = EnvVarGuard::set(ENV_VOLATILITY, "2.5");

        let config = Config::from_env().unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.game.total_steps, 30);
        assert_eq!(config.game.starting_cash, 500.0);
        assert_eq!(config.game.volatility, 2.5);
        assert_eq!(config.game.drift_bias, 0.02);
    }

    #[test]
    fn returns_error_for_unparsable_seed() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_SEED, "-3");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidSeed));
    }

    #[test]
    fn returns_error_for_non_finite_drift() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_DRIFT_BIAS, "NaN");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidDriftBias));
    }

    #[test]
    fn returns_error_when_start_price_is_below_floor() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _price = EnvVarGuard::set(ENV_START_PRICE, "5");
        let _floor = EnvVarGuard::set(ENV_PRICE_FLOOR, "10");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidGame(core_sim::ConfigError::InvalidStartPrice)
        ));
    }

    #[test]
    fn returns_error_for_zero_steps() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_TOTAL_STEPS, "0");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidGame(core_sim::ConfigError::InvalidTotalSteps)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn returns_error_for_non_unicode_env_var() {
        use std::os::unix::ffi::OsStringExt;

        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set_os(
            ENV_VOLATILITY,
            std::ffi::OsString::from_vec(vec![0x66, 0x6f, 0x80]),
        );

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::NonUnicode(ENV_VOLATILITY)));
    }
}
