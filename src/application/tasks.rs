//! Task graph and runner
//!
//! Every named task expands into a fixed sequence of stages built from the
//! primitive tasks. A stage either runs one primitive or runs several at once.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::application::clean::CleanUseCase;
use crate::application::compile::CompileUseCase;
use crate::application::context::BuildContext;
use crate::application::copy::CopyFilesUseCase;
use crate::application::events::TaskEvent;
use crate::application::supervisor::SupervisorUseCase;
use crate::application::watch::WatchUseCase;
use crate::domain::ports::{Compiler, FileSystem, ProcessLauncher};
use crate::error::BuildResult;

/// Named tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Clean,
    CompileTs,
    CopyFiles,
    Compile,
    Watch,
    Serve,
    Rebuild,
    Dev,
}

/// One step of a task's plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Run(Task),
    /// Run concurrently; the stage ends when all of them have returned
    Parallel(Vec<Task>),
}

impl Task {
    pub const ALL: [Task; 8] = [
        Task::Clean,
        Task::CompileTs,
        Task::CopyFiles,
        Task::Compile,
        Task::Watch,
        Task::Serve,
        Task::Rebuild,
        Task::Dev,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Task::Clean => "clean",
            Task::CompileTs => "compile-ts",
            Task::CopyFiles => "copy-files",
            Task::Compile => "compile",
            Task::Watch => "watch",
            Task::Serve => "serve",
            Task::Rebuild => "rebuild",
            Task::Dev => "dev",
        }
    }

    pub fn from_name(name: &str) -> Option<Task> {
        Task::ALL.into_iter().find(|task| task.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Task::Clean => "Delete the dist and maps directories",
            Task::CompileTs => "Compile TypeScript sources with source maps",
            Task::CopyFiles => "Copy JavaScript, example files and (production) package.json",
            Task::Compile => "Compile, then copy assets",
            Task::Watch => "Rebuild single files as the source tree changes",
            Task::Serve => "Run the server and restart it on output changes or crashes",
            Task::Rebuild => "Clean, then compile",
            Task::Dev => "Clean, compile, then watch and serve together",
        }
    }

    /// Primitives run directly; the others only expand into stages
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Task::Clean | Task::CompileTs | Task::CopyFiles | Task::Watch | Task::Serve
        )
    }

    /// Whether the plan ends in a loop that only stops on Ctrl+C
    pub fn runs_until_stopped(&self) -> bool {
        self.plan().iter().any(|stage| match stage {
            Stage::Run(task) => matches!(task, Task::Watch | Task::Serve),
            Stage::Parallel(_) => true,
        })
    }

    /// Stages in execution order, composites fully expanded
    pub fn plan(&self) -> Vec<Stage> {
        match self {
            Task::Compile => [Task::CompileTs.plan(), Task::CopyFiles.plan()].concat(),
            Task::Rebuild => [Task::Clean.plan(), Task::Compile.plan()].concat(),
            Task::Dev => {
                let mut stages = Task::Rebuild.plan();
                stages.push(Stage::Parallel(vec![Task::Watch, Task::Serve]));
                stages
            }
            primitive => vec![Stage::Run(*primitive)],
        }
    }

    /// Human-readable plan, e.g. `clean → compile-ts → copy-files`
    pub fn composition(&self) -> String {
        self.plan()
            .iter()
            .map(|stage| match stage {
                Stage::Run(task) => task.name().to_string(),
                Stage::Parallel(tasks) => format!(
                    "({})",
                    tasks.iter().map(Task::name).collect::<Vec<_>>().join(" | ")
                ),
            })
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs task plans against concrete adapters
pub struct TaskRunner<'a, C, FS, L> {
    ctx: &'a BuildContext,
    compiler: C,
    fs: FS,
    launcher: L,
}

impl<'a, C, FS, L> TaskRunner<'a, C, FS, L>
where
    C: Compiler + Sync,
    FS: FileSystem + Sync,
    L: ProcessLauncher + Sync,
{
    pub fn new(ctx: &'a BuildContext, compiler: C, fs: FS, launcher: L) -> Self {
        Self {
            ctx,
            compiler,
            fs,
            launcher,
        }
    }

    /// Run every stage of `task`. The first failing stage ends the run.
    pub fn run<F>(&self, task: Task, running: &AtomicBool, on_event: &F) -> BuildResult<()>
    where
        F: Fn(TaskEvent) + Sync,
    {
        log::debug!("{task}: {}", task.composition());
        for stage in task.plan() {
            match stage {
                Stage::Run(primitive) => self.run_primitive(primitive, running, on_event)?,
                Stage::Parallel(tasks) => self.run_parallel(&tasks, running, on_event)?,
            }
        }
        Ok(())
    }

    fn run_parallel<F>(&self, tasks: &[Task], running: &AtomicBool, on_event: &F) -> BuildResult<()>
    where
        F: Fn(TaskEvent) + Sync,
    {
        std::thread::scope(|scope| {
            let handles: Vec<_> = tasks
                .iter()
                .map(|&task| {
                    scope.spawn(move || {
                        let result = self.run_primitive(task, running, on_event);
                        if result.is_err() {
                            // take the sibling tasks down too
                            running.store(false, Ordering::SeqCst);
                        }
                        result
                    })
                })
                .collect();

            let mut first_error = None;
            for handle in handles {
                match handle.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        first_error.get_or_insert(e);
                    }
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            first_error.map_or(Ok(()), Err)
        })
    }

    fn run_primitive<F>(&self, task: Task, running: &AtomicBool, on_event: &F) -> BuildResult<()>
    where
        F: Fn(TaskEvent) + Sync,
    {
        if !task.is_primitive() {
            return self.run(task, running, on_event);
        }

        on_event(TaskEvent::TaskStarted {
            task: task.name().to_string(),
        });
        let result = match task {
            Task::Clean => CleanUseCase::new(&self.fs)
                .execute(&self.ctx.clean_targets(), on_event)
                .map(|_| ()),
            Task::CompileTs => CompileUseCase::new(self.ctx, &self.compiler, &self.fs)
                .compile_all(on_event)
                .map(|_| ()),
            Task::CopyFiles => CopyFilesUseCase::new(self.ctx, &self.fs)
                .execute(on_event)
                .map(|_| ()),
            Task::Watch => WatchUseCase::new(self.ctx, &self.compiler, &self.fs)
                .start(running, on_event),
            Task::Serve => SupervisorUseCase::new(self.ctx, &self.launcher).run(running, on_event),
            Task::Compile | Task::Rebuild | Task::Dev => Ok(()),
        };

        if let Err(e) = &result {
            on_event(TaskEvent::Error {
                message: format!("{task}: {e}"),
            });
            return result;
        }
        on_event(TaskEvent::TaskFinished {
            task: task.name().to_string(),
        });
        Ok(())
    }
}
