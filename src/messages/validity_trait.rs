/// Sanity check for decoded wire structures whose fields must agree with
/// each other, e.g. a length field against its buffer capacity.
pub trait Validity {
  fn valid(&self) -> bool;
}
