use excellence_core::{CellError, CellValue};

use crate::Arg;

/// Numeric argument the way Excel hands it to a custom function:
/// empty cells are zero, errors propagate, text must parse.
fn number_arg(arg: Option<&Arg>) -> Result<f64, CellError> {
    match arg {
        Some(Arg::Value(CellValue::Empty)) | None => Ok(0.0),
        Some(Arg::Value(CellValue::Error(e))) => Err(e.clone()),
        Some(Arg::Value(v)) => v.as_number().ok_or(CellError::InvalidValue),
        Some(Arg::Range(_)) => Err(CellError::InvalidValue),
    }
}

/// AGGIRR - Aggregate return: expected future value / original beginning value
pub fn aggirr(args: &[Arg]) -> CellValue {
    if args.len() != 2 {
        return CellValue::Error(CellError::InvalidValue);
    }

    let future = match number_arg(args.first()) {
        Ok(n) => n,
        Err(e) => return CellValue::Error(e),
    };
    let beginning = match number_arg(args.get(1)) {
        Ok(n) => n,
        Err(e) => return CellValue::Error(e),
    };

    if beginning == 0.0 {
        return CellValue::Error(CellError::DivisionByZero);
    }

    let result = future / beginning;
    if result.is_finite() {
        CellValue::Number(result)
    } else {
        CellValue::Error(CellError::NumError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Arg {
        Arg::Value(CellValue::Number(n))
    }

    #[test]
    fn test_aggirr() {
        assert_eq!(aggirr(&[num(150.0), num(100.0)]), CellValue::Number(1.5));
        assert_eq!(aggirr(&[num(-50.0), num(200.0)]), CellValue::Number(-0.25));
        assert_eq!(
            aggirr(&[Arg::Value("120".into()), num(100.0)]),
            CellValue::Number(1.2)
        );
    }

    #[test]
    fn test_aggirr_zero_beginning_value() {
        assert_eq!(
            aggirr(&[num(150.0), num(0.0)]),
            CellValue::Error(CellError::DivisionByZero)
        );
        assert_eq!(
            aggirr(&[num(150.0), Arg::Value(CellValue::Empty)]),
            CellValue::Error(CellError::DivisionByZero)
        );
    }

    #[test]
    fn test_aggirr_bad_arguments() {
        assert_eq!(aggirr(&[num(1.0)]), CellValue::Error(CellError::InvalidValue));
        assert_eq!(
            aggirr(&[Arg::Value("abc".into()), num(1.0)]),
            CellValue::Error(CellError::InvalidValue)
        );
        assert_eq!(
            aggirr(&[Arg::Value(CellValue::Error(CellError::NotAvailable)), num(1.0)]),
            CellValue::Error(CellError::NotAvailable)
        );
        assert_eq!(
            aggirr(&[num(f64::MAX), num(f64::MIN_POSITIVE)]),
            CellValue::Error(CellError::NumError)
        );
    }
}
