use std::marker::PhantomData;

use crate::executor::ActivationId;

/// Trait representing the user function applied to each element of a map
/// job. One instance is shared by every worker running activations of the
/// job, so stateful handlers need interior mutability.
pub trait CallHandler
where
    Self: Send + Sync + Sized + 'static,
{
    type Input: Send + 'static;
    type Output: Send + 'static;

    fn handle(&self, id: ActivationId, input: Self::Input) -> anyhow::Result<Self::Output>;
}

pub struct FnCallHandler<F, Input, Output>
where
    Self: Send + 'static,
    F: Fn(ActivationId, Input) -> Output,
    Input: Send + 'static,
    Output: Send + 'static,
{
    op: F,
    _req: PhantomData<fn(Input)>,
    _resp: PhantomData<fn() -> Output>,
}

impl<F, Input, Output> FnCallHandler<F, Input, Output>
where
    Self: Send + 'static,
    F: Fn(ActivationId, Input) -> Output,
    Input: Send + 'static,
    Output: Send + 'static,
{
    pub(crate) fn new(op: F) -> Self {
        Self {
            op,
            _req: PhantomData,
            _resp: PhantomData,
        }
    }
}

impl<F, Input, Output> From<F> for FnCallHandler<F, Input, Output>
where
    Self: Send + 'static,
    F: Fn(ActivationId, Input) -> Output,
    Input: Send + 'static,
    Output: Send + 'static,
{
    fn from(op: F) -> Self {
        Self::new(op)
    }
}

impl<F, Input, Output> CallHandler for FnCallHandler<F, Input, Output>
where
    Self: Send + Sync + 'static,
    F: Fn(ActivationId, Input) -> Output,
    Input: Send + 'static,
    Output: Send + 'static,
{
    type Input = Input;
    type Output = Output;

    fn handle(&self, id: ActivationId, input: Self::Input) -> anyhow::Result<Self::Output> {
        Ok((self.op)(id, input))
    }
}
