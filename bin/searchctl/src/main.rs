use searchclient::errors::ConfigurationError;
use searchclient::errors::CryptoInitializationError;
use searchctl::run;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let result = run().await;
    let error = match result {
        Err(error) => error,
        Ok(0) => return,
        Ok(num) => std::process::exit(num),
    };

    // Provide better error messages for cases where we can provide suggestions to the user.
    if let Some(searchclient::conf::Error::PathNotFound(path)) = error.downcast_ref() {
        eprintln!("{}", error);
        eprintln!("Provide a configuration file with '--config <path>' (looked for '{}')", path);
        std::process::exit(1);
    }
    if error.is::<ConfigurationError>() {
        eprintln!("{:?}", error);
        eprintln!("Check the secure_comms, truststore and keystore options in the configuration");
        std::process::exit(1);
    }
    if error.is::<CryptoInitializationError>() {
        eprintln!("{:?}", error);
        eprintln!("Check the trust and key stores hold valid PEM certificates and keys");
        std::process::exit(1);
    }

    // Print the error in detailed format for all other cases.
    eprintln!("{:?}", error);
    std::process::exit(1);
}
