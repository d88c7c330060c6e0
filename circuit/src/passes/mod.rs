mod translate;

pub use self::translate::AstToCircuit;
