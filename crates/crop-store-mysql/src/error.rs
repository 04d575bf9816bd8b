//! Classification of MySQL errors into store errors.

use crop_core::StoreError;

/// Server error codes raised when a row violates a table constraint:
/// bad null, duplicate key, out of range, bad value, bad date, foreign key,
/// check constraint.
const CONSTRAINT_CODES: [u16; 7] = [1048, 1062, 1264, 1366, 1292, 1452, 3819];

/// Server error codes raised while establishing a session:
/// access denied, unknown database.
const CONNECTION_CODES: [u16; 2] = [1045, 1049];

/// Map a mysql_async error onto the gateway error taxonomy.
pub(crate) fn store_error(err: mysql_async::Error) -> StoreError {
    match &err {
        mysql_async::Error::Server(server) if CONSTRAINT_CODES.contains(&server.code) => {
            StoreError::Constraint(err.to_string())
        }
        mysql_async::Error::Server(server) if CONNECTION_CODES.contains(&server.code) => {
            StoreError::Connection(err.to_string())
        }
        mysql_async::Error::Io(_) | mysql_async::Error::Url(_) | mysql_async::Error::Driver(_) => {
            StoreError::Connection(err.to_string())
        }
        _ => StoreError::Transaction(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mysql_async::ServerError;

    fn server_error(code: u16) -> mysql_async::Error {
        mysql_async::Error::Server(ServerError {
            code,
            message: format!("server error {code}"),
            state: "HY000".to_string(),
        })
    }

    #[test]
    fn test_constraint_codes() {
        for code in CONSTRAINT_CODES {
            assert!(
                matches!(store_error(server_error(code)), StoreError::Constraint(_)),
                "code {code}"
            );
        }
    }

    #[test]
    fn test_connection_codes() {
        assert!(matches!(
            store_error(server_error(1045)),
            StoreError::Connection(_)
        ));
        assert!(matches!(
            store_error(server_error(1049)),
            StoreError::Connection(_)
        ));
    }

    #[test]
    fn test_unlisted_server_code_is_a_transaction_error() {
        // 1213: deadlock found when trying to get lock
        let err = store_error(server_error(1213));
        assert!(matches!(err, StoreError::Transaction(_)));
        assert!(err.to_string().contains("server error 1213"));
    }

    #[test]
    fn test_io_and_url_errors_are_connection_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            store_error(mysql_async::Error::Io(io.into())),
            StoreError::Connection(_)
        ));

        let url = mysql_async::Opts::from_url("postgres://localhost/crops")
            .err()
            .map(mysql_async::Error::Url)
            .unwrap();
        assert!(matches!(store_error(url), StoreError::Connection(_)));
    }
}
