/// A [Pass] is, in its broadest sense, a transformation applied to some input to
/// produce some output, with the possibility of failure.
///
/// Typically, a pass will be some rewrite or analysis applied to an intermediate
/// representation, where the input and output types are the same, but this trait
/// makes no such assumption: passes may lower one representation to an entirely
/// different one, as long as the types of adjacent passes in a pipeline line up.
///
/// Passes are intended to be composed with [Pass::chain], which produces a new
/// [Pass] that runs both passes in sequence, feeding the output of the first to
/// the input of the second.
pub trait Pass {
    type Input<'a>;
    type Output<'a>;
    type Error;

    /// Runs the pass on the given input.
    ///
    /// Passes should not generally have side effects, so it is expected that
    /// running a pass twice on the same input produces the same output.
    fn run<'a>(&mut self, input: Self::Input<'a>) -> Result<Self::Output<'a>, Self::Error>;

    /// Chains two passes together to form a new, fused pass.
    fn chain<P>(self, pass: P) -> Chain<Self, P>
    where
        Self: Sized,
        P: for<'a> Pass<Input<'a> = Self::Output<'a>>,
        <P as Pass>::Error: From<Self::Error>,
    {
        Chain::new(self, pass)
    }
}

/// [Chain] represents a pipeline of two or more passes, and is itself a [Pass].
pub struct Chain<A, B> {
    a: A,
    b: B,
}
impl<A, B> Chain<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}
impl<A, B> Pass for Chain<A, B>
where
    A: Pass,
    B: for<'a> Pass<Input<'a> = <A as Pass>::Output<'a>>,
    <B as Pass>::Error: From<<A as Pass>::Error>,
{
    type Input<'a> = <A as Pass>::Input<'a>;
    type Output<'a> = <B as Pass>::Output<'a>;
    type Error = <B as Pass>::Error;

    fn run<'a>(&mut self, input: Self::Input<'a>) -> Result<Self::Output<'a>, Self::Error> {
        let output = self.a.run(input)?;
        self.b.run(output)
    }
}
