//! The conformance run loop.
//!
//! Suites run in a fixed order (keyGen, sigGen, sigVer), groups and cases
//! in document order, one case at a time. Progress streams to stdout as
//! `Running <op> test case <id> ... ` followed by `OK` or `SKIP <reason>`;
//! the first fatal error prints `FAIL!` to stderr and is returned to the
//! caller, aborting everything that would have followed.

use std::io::{self, Write};

use crate::error::Result;
use crate::filter::{self, Disposition};
use crate::invoke::{
    Executor, HarnessConfig, Invocation, Operation, ParameterSet, ProcessExecutor, RawOutput,
};
use crate::vectors::{
    KeyGenCase, KeyGenGroup, KeyGenSuite, SigGenCase, SigGenGroup, SigGenSuite, SigVerCase,
    SigVerGroup, SigVerSuite, VectorSet,
};
use crate::verify;

/// Case counts for one completed suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    /// Cases dispatched to the implementation and verified.
    pub executed: usize,
    /// Cases reported as skipped.
    pub skipped: usize,
}

/// Case counts for a completed full run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// keyGen suite counts.
    pub key_gen: SuiteSummary,
    /// sigGen suite counts.
    pub sig_gen: SuiteSummary,
    /// sigVer suite counts.
    pub sig_ver: SuiteSummary,
}

/// Drives vector suites against an implementation under test.
///
/// Generic over the [`Executor`] so the whole flow can be exercised in
/// tests without spawning processes.
pub struct Harness<E> {
    config: HarnessConfig,
    executor: E,
}

impl Harness<ProcessExecutor> {
    /// Harness running the implementation binaries as child processes.
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_executor(config, ProcessExecutor)
    }
}

impl<E: Executor> Harness<E> {
    /// Harness with a caller-supplied executor.
    pub fn with_executor(config: HarnessConfig, executor: E) -> Self {
        Self { config, executor }
    }

    /// Run all three suites in the fixed keyGen, sigGen, sigVer order.
    pub fn run_all(&self, vectors: &VectorSet) -> Result<RunSummary> {
        Ok(RunSummary {
            key_gen: self.run_key_gen(&vectors.key_gen)?,
            sig_gen: self.run_sig_gen(&vectors.sig_gen)?,
            sig_ver: self.run_sig_ver(&vectors.sig_ver)?,
        })
    }

    /// Run every case of a keyGen suite.
    pub fn run_key_gen(&self, suite: &KeyGenSuite) -> Result<SuiteSummary> {
        let mut summary = SuiteSummary::default();
        for group in &suite.test_groups {
            for case in &group.tests {
                progress(Operation::KeyGen, case.tc_id);
                match self.key_gen_case(group, case) {
                    Ok(()) => {
                        println!("OK");
                        summary.executed += 1;
                    }
                    Err(err) => {
                        eprintln!("FAIL!");
                        return Err(err);
                    }
                }
            }
        }
        Ok(summary)
    }

    /// Run every case of a sigGen suite.
    pub fn run_sig_gen(&self, suite: &SigGenSuite) -> Result<SuiteSummary> {
        let mut summary = SuiteSummary::default();
        for group in &suite.test_groups {
            for case in &group.tests {
                progress(Operation::SigGen, case.tc_id);
                match self.sig_gen_case(group, case) {
                    Ok(Disposition::Run) => {
                        println!("OK");
                        summary.executed += 1;
                    }
                    Ok(Disposition::Skip(reason)) => {
                        println!("SKIP {reason}");
                        summary.skipped += 1;
                    }
                    Err(err) => {
                        eprintln!("FAIL!");
                        return Err(err);
                    }
                }
            }
        }
        Ok(summary)
    }

    /// Run every case of a sigVer suite.
    pub fn run_sig_ver(&self, suite: &SigVerSuite) -> Result<SuiteSummary> {
        let mut summary = SuiteSummary::default();
        for group in &suite.test_groups {
            for case in &group.tests {
                progress(Operation::SigVer, case.tc_id);
                match self.sig_ver_case(group, case) {
                    Ok(Disposition::Run) => {
                        println!("OK");
                        summary.executed += 1;
                    }
                    Ok(Disposition::Skip(reason)) => {
                        println!("SKIP {reason}");
                        summary.skipped += 1;
                    }
                    Err(err) => {
                        eprintln!("FAIL!");
                        return Err(err);
                    }
                }
            }
        }
        Ok(summary)
    }

    fn key_gen_case(&self, group: &KeyGenGroup, case: &KeyGenCase) -> Result<()> {
        let set = ParameterSet::from_name(&group.parameter_set)?;
        filter::ensure_aft(Operation::KeyGen, group.tg_id, &group.test_type)?;
        let invocation = Invocation::key_gen(&self.config, set, &case.seed);
        let raw = self.execute(&invocation)?;
        verify::verify_key_gen(&invocation, case, &raw)
    }

    fn sig_gen_case(&self, group: &SigGenGroup, case: &SigGenCase) -> Result<Disposition> {
        let set = ParameterSet::from_name(&group.parameter_set)?;
        match filter::filter_sig_gen(group)? {
            Disposition::Run => {}
            skip => return Ok(skip),
        }
        filter::validate_sig_gen_case(case)?;
        let rnd = filter::effective_rnd(group, case)?;
        let invocation =
            Invocation::sig_gen(&self.config, set, &case.message, rnd, &case.sk, &case.context);
        let raw = self.execute(&invocation)?;
        verify::verify_sig_gen(&invocation, case, &raw)?;
        Ok(Disposition::Run)
    }

    fn sig_ver_case(&self, group: &SigVerGroup, case: &SigVerCase) -> Result<Disposition> {
        let set = ParameterSet::from_name(&group.parameter_set)?;
        match filter::filter_sig_ver(group) {
            Disposition::Run => {}
            skip => return Ok(skip),
        }
        filter::validate_sig_ver_case(case)?;
        let invocation = Invocation::sig_ver(
            &self.config,
            set,
            &case.message,
            &case.context,
            &case.signature,
            &case.pk,
        );
        let raw = self.execute(&invocation)?;
        verify::verify_sig_ver(case, &raw)?;
        Ok(Disposition::Run)
    }

    fn execute(&self, invocation: &Invocation) -> Result<RawOutput> {
        if self.config.verbose {
            eprintln!("Invoking: {invocation}");
        }
        self.executor.execute(invocation)
    }
}

// Leaves the line open so OK / SKIP land after the ellipsis.
fn progress(operation: Operation, tc_id: u32) {
    print!("Running {operation} test case {tc_id} ... ");
    let _ = io::stdout().flush();
}
